mod point;
mod rectangle;
mod size;

pub use point::Point;
pub use rectangle::Rectangle;
pub use size::Size;

use crate::error::Error;

/// Splits `input` on whitespace and parses exactly `N` values, in order.
///
/// `names` labels each field for error reporting.
fn parse_fields<T, const N: usize>(input: &str, names: [&'static str; N]) -> crate::Result<[T; N]>
where
    T: std::str::FromStr + Copy + Default,
{
    let mut tokens = input.split_whitespace();
    let mut values = [T::default(); N];
    for (value, name) in values.iter_mut().zip(names) {
        *value = tokens
            .next()
            .ok_or(Error::MissingRequiredToken(name))?
            .parse()
            .map_err(|_| Error::ParsingOfTokenFailed(name))?;
    }
    if let Some(token) = tokens.next() {
        return Err(Error::UnexpectedTrailingToken(token.to_owned()));
    }
    Ok(values)
}
