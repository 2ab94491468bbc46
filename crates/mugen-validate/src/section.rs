//! Classification of state file section headers.
//!
//! Section names arrive lowercased from the parser. `statedef` is tested
//! before `state` since every statedef name also starts with `state`.

const STATEDEF_PREFIX: &str = "statedef";
const STATE_PREFIX: &str = "state";

/// Number written in a `[Statedef N]` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatedefHeader<'a> {
    /// Text of the number as written.
    pub raw_id: &'a str,
    /// `None` when `raw_id` is not an integer.
    pub id: Option<i32>,
}

/// Number written in a `[State N, label]` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateNumber<'a> {
    Omitted,
    Number(i32),
    Malformed(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateHeader<'a> {
    pub number: StateNumber<'a>,
    /// Whether a space follows the `state` keyword. MUGEN refuses to load
    /// a state file with a header such as `[State-1]`.
    pub has_separator: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind<'a> {
    Statedef(StatedefHeader<'a>),
    State(StateHeader<'a>),
    /// Any section the state validator does not inspect (`[Data]`, `[Size]`, ...).
    Other,
}

impl<'a> SectionKind<'a> {
    pub fn classify(name: &'a str) -> Self {
        if let Some(rest) = name.strip_prefix(STATEDEF_PREFIX) {
            let raw_id = rest
                .trim_start()
                .split([' ', ','])
                .next()
                .unwrap_or_default()
                .trim();
            return Self::Statedef(StatedefHeader {
                raw_id,
                id: raw_id.parse().ok(),
            });
        }
        if name.starts_with(STATE_PREFIX) {
            return Self::State(parse_state_header(name));
        }
        Self::Other
    }
}

fn parse_state_header(name: &str) -> StateHeader<'_> {
    let Some((_, suffix)) = name.split_once(' ') else {
        return StateHeader {
            number: StateNumber::Omitted,
            has_separator: false,
        };
    };
    let raw = suffix.split(',').next().unwrap_or_default().trim();
    let number = if raw.is_empty() {
        StateNumber::Omitted
    } else {
        match raw.parse() {
            Ok(n) => StateNumber::Number(n),
            Err(_) => StateNumber::Malformed(raw),
        }
    };
    StateHeader {
        number,
        has_separator: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(name: &str) -> StateHeader<'_> {
        match SectionKind::classify(name) {
            SectionKind::State(header) => header,
            other => panic!("{name} classified as {other:?}"),
        }
    }

    #[test]
    fn statedef_headers() {
        assert_eq!(
            SectionKind::classify("statedef 200"),
            SectionKind::Statedef(StatedefHeader {
                raw_id: "200",
                id: Some(200)
            })
        );
        assert_eq!(
            SectionKind::classify("statedef -1, ai"),
            SectionKind::Statedef(StatedefHeader {
                raw_id: "-1",
                id: Some(-1)
            })
        );
        assert_eq!(
            SectionKind::classify("statedef abc"),
            SectionKind::Statedef(StatedefHeader {
                raw_id: "abc",
                id: None
            })
        );
    }

    #[test]
    fn state_headers() {
        assert_eq!(state("state 200, 1").number, StateNumber::Number(200));
        assert_eq!(state("state -1, combo").number, StateNumber::Number(-1));
        assert_eq!(state("state , 1").number, StateNumber::Omitted);
        assert_eq!(state("state x, 1").number, StateNumber::Malformed("x"));
        assert!(state("state 0").has_separator);

        let bare = state("state");
        assert_eq!(bare.number, StateNumber::Omitted);
        assert!(!bare.has_separator);
        assert!(!state("state200,1").has_separator);
    }

    #[test]
    fn other_sections() {
        assert_eq!(SectionKind::classify("data"), SectionKind::Other);
        assert_eq!(SectionKind::classify("command"), SectionKind::Other);
    }
}
