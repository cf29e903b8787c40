use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// One of the three control systems that can drive the stand.
///
/// Which label is active follows from the two relay states; see
/// `sv_periods::classify`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SystemLabel {
    #[serde(rename = "system_1")]
    System1,
    #[serde(rename = "system_2")]
    System2,
    #[serde(rename = "system_3")]
    System3,
}

impl SystemLabel {
    pub const ALL: [SystemLabel; 3] = [Self::System1, Self::System2, Self::System3];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::System1 => "system_1",
            Self::System2 => "system_2",
            Self::System3 => "system_3",
        }
    }
}

impl fmt::Display for SystemLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SystemLabel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| CoreError::Parse {
                what: "system label",
                input: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_round_trips_through_str() {
        for label in SystemLabel::ALL {
            assert_eq!(label.as_str().parse::<SystemLabel>().unwrap(), label);
        }
        assert!("system_4".parse::<SystemLabel>().is_err());
    }
}
