use crate::geometry::{Point, Rectangle};
use crate::{FillValue, Operation};
use clap::{
    arg, builder::PossibleValue, crate_authors, crate_description, crate_name, crate_version,
    value_parser, Arg, ArgGroup, ArgMatches, Command, ValueEnum,
};
use std::ffi::OsString;
use std::path::PathBuf;

pub struct CLIParser {
    command: Command,
}

impl ValueEnum for FillValue {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Zeros, Self::Ones]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        match self {
            Self::Zeros => Some(PossibleValue::new("zeros")),
            Self::Ones => Some(PossibleValue::new("ones")),
        }
    }
}

const INFO_SUBCOMMAND: &str = "info";
const PRINT_SUBCOMMAND: &str = "print";
const ROI_SUBCOMMAND: &str = "roi";
const ADD_SUBCOMMAND: &str = "add";
const SUBTRACT_SUBCOMMAND: &str = "subtract";
const FILL_SUBCOMMAND: &str = "fill";

impl CLIParser {
    pub fn new() -> Self {
        let command = Self::create_base_command();
        let command = Self::register_subcommands(command);
        CLIParser { command }
    }

    pub fn parse<I, T>(&mut self, itr: I) -> Operation
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self
            .command
            .try_get_matches_from_mut(itr)
            .unwrap_or_else(|e| e.exit());
        Self::extract_operation(&matches)
    }

    fn register_subcommands(command: Command) -> Command {
        command
            .subcommand_required(true)
            .arg_required_else_help(true)
            .subcommand(Self::create_info_subcommand())
            .subcommand(Self::create_print_subcommand())
            .subcommand(Self::create_roi_subcommand())
            .subcommand(Self::create_add_subcommand())
            .subcommand(Self::create_subtract_subcommand())
            .subcommand(Self::create_fill_subcommand())
    }

    fn create_base_command() -> Command {
        Command::new(crate_name!())
            .version(crate_version!())
            .author(crate_authors!())
            .about(crate_description!())
    }

    fn create_info_subcommand() -> Command {
        Command::new(INFO_SUBCOMMAND)
            .about("Print the size of a PGM image")
            .arg(Self::create_input_file_argument())
    }

    fn create_print_subcommand() -> Command {
        Command::new(PRINT_SUBCOMMAND)
            .about("Print the samples of a PGM image as text")
            .arg(Self::create_input_file_argument())
    }

    fn create_roi_subcommand() -> Command {
        Command::new(ROI_SUBCOMMAND)
            .about("Extract a rectangular region of a PGM image")
            .arg(Self::create_input_file_argument())
            .arg(Self::create_output_file_argument())
            .arg(Self::create_rect_argument())
            .arg(Self::create_corner_argument("from", "First corner of the region"))
            .arg(Self::create_corner_argument("to", "Opposite corner of the region"))
            .group(
                ArgGroup::new("region")
                    .args(["rect", "from"])
                    .required(true),
            )
    }

    fn create_add_subcommand() -> Command {
        Command::new(ADD_SUBCOMMAND)
            .about("Add two PGM images sample by sample, saturating at 255")
            .arg(Self::create_left_file_argument())
            .arg(Self::create_right_file_argument())
            .arg(Self::create_output_file_argument())
    }

    fn create_subtract_subcommand() -> Command {
        Command::new(SUBTRACT_SUBCOMMAND)
            .about("Subtract two PGM images sample by sample, saturating at 0")
            .arg(Self::create_left_file_argument())
            .arg(Self::create_right_file_argument())
            .arg(Self::create_output_file_argument())
    }

    fn create_fill_subcommand() -> Command {
        Command::new(FILL_SUBCOMMAND)
            .about("Write a PGM image filled with a constant value")
            .arg(Self::create_output_file_argument())
            .arg(
                arg!(width: -W --width <WIDTH> "Image width")
                    .required(true)
                    .value_parser(value_parser!(u32)),
            )
            .arg(
                arg!(height: -H --height <HEIGHT> "Image height")
                    .required(true)
                    .value_parser(value_parser!(u32)),
            )
            .arg(
                arg!(value: -v --value <VALUE> "Fill value")
                    .default_value("zeros")
                    .value_parser(value_parser!(FillValue)),
            )
    }

    fn create_input_file_argument() -> Arg {
        Arg::new("input_file")
            .help("Path to PGM input file")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_left_file_argument() -> Arg {
        Arg::new("left_file")
            .help("Path to left hand PGM operand")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_right_file_argument() -> Arg {
        Arg::new("right_file")
            .help("Path to right hand PGM operand")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_output_file_argument() -> Arg {
        Arg::new("output_file")
            .help("Path to PGM output file")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_rect_argument() -> Arg {
        arg!(rect: -r --rect <RECT> "Region as \"x y width height\"")
            .required(false)
            .allow_hyphen_values(true)
            .value_parser(|s: &str| s.parse::<Rectangle>().map_err(|e| e.to_string()))
    }

    fn create_corner_argument(name: &'static str, help: &'static str) -> Arg {
        Arg::new(name)
            .long(name)
            .value_name("POINT")
            .allow_hyphen_values(true)
            .help(format!("{} as \"x y\"", help))
            .value_parser(|s: &str| s.parse::<Point>().map_err(|e| e.to_string()))
            .requires(if name == "from" { "to" } else { "from" })
            .conflicts_with("rect")
    }

    fn extract_operation(matches: &ArgMatches) -> Operation {
        match matches.subcommand() {
            Some((INFO_SUBCOMMAND, sub_matches)) => Operation::Info {
                input_file: Self::extract_path_argument(sub_matches, "input_file"),
            },
            Some((PRINT_SUBCOMMAND, sub_matches)) => Operation::Print {
                input_file: Self::extract_path_argument(sub_matches, "input_file"),
            },
            Some((ROI_SUBCOMMAND, sub_matches)) => Operation::Roi {
                input_file: Self::extract_path_argument(sub_matches, "input_file"),
                output_file: Self::extract_path_argument(sub_matches, "output_file"),
                region: Self::extract_region_argument(sub_matches),
            },
            Some((ADD_SUBCOMMAND, sub_matches)) => Operation::Add {
                left_file: Self::extract_path_argument(sub_matches, "left_file"),
                right_file: Self::extract_path_argument(sub_matches, "right_file"),
                output_file: Self::extract_path_argument(sub_matches, "output_file"),
            },
            Some((SUBTRACT_SUBCOMMAND, sub_matches)) => Operation::Subtract {
                left_file: Self::extract_path_argument(sub_matches, "left_file"),
                right_file: Self::extract_path_argument(sub_matches, "right_file"),
                output_file: Self::extract_path_argument(sub_matches, "output_file"),
            },
            Some((FILL_SUBCOMMAND, sub_matches)) => Operation::Fill {
                output_file: Self::extract_path_argument(sub_matches, "output_file"),
                width: Self::extract_dimension_argument(sub_matches, "width"),
                height: Self::extract_dimension_argument(sub_matches, "height"),
                value: Self::extract_fill_value_argument(sub_matches),
            },
            _ => unreachable!("A subcommand is required"),
        }
    }

    fn extract_path_argument(matches: &ArgMatches, name: &str) -> PathBuf {
        matches
            .get_one::<PathBuf>(name)
            .unwrap_or_else(|| panic!("Required argument {} not provided", name))
            .clone()
    }

    fn extract_region_argument(matches: &ArgMatches) -> Rectangle {
        if let Some(rect) = matches.get_one::<Rectangle>("rect") {
            return *rect;
        }
        let from = matches
            .get_one::<Point>("from")
            .expect("Either rect or from and to must be provided");
        let to = matches
            .get_one::<Point>("to")
            .expect("Argument to is required by from");
        Rectangle::from_points(*from, *to)
    }

    fn extract_dimension_argument(matches: &ArgMatches, name: &str) -> u32 {
        *matches
            .get_one::<u32>(name)
            .unwrap_or_else(|| panic!("Required argument {} not provided", name))
    }

    fn extract_fill_value_argument(matches: &ArgMatches) -> FillValue {
        matches
            .get_one::<FillValue>("value")
            .expect("Fill value must be provided, but was unset.")
            .to_owned()
    }
}

impl Default for CLIParser {
    fn default() -> Self {
        Self::new()
    }
}
