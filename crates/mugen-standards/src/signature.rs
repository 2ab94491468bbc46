//! Property type signatures.
//!
//! A signature is a whitespace-separated list of type tokens:
//!
//! | Signature         | Slots                      |
//! |-------------------|----------------------------|
//! | `int`             | `[Int]`                    |
//! | `float tuple`     | `[Float, Float]`           |
//! | `int triple`      | `[Int, Int, Int]`          |
//! | `string int`      | `[String, Int]`            |
//! | `enum int int`    | `[Enum, Int, Int]`         |
//!
//! `tuple` and `triple` are only recognised in second position; tokens after
//! them are ignored. Unknown tokens become [`PropType::None`].

use mugen_model::PropType;

pub fn parse_signature(signature: &str) -> Vec<PropType> {
    let tokens: Vec<&str> = signature.split_whitespace().collect();
    let Some(first) = tokens.first() else {
        return vec![PropType::None];
    };
    let first = PropType::from_token(first);
    match tokens.get(1).map(|t| t.to_ascii_lowercase()) {
        None => vec![first],
        Some(second) if second == "tuple" => vec![first; 2],
        Some(second) if second == "triple" => vec![first; 3],
        Some(_) => tokens.iter().map(|t| PropType::from_token(t)).collect(),
    }
}
