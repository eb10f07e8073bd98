use nanoserde::{DeRon, SerRon};

use crate::{InputError, Key};

/// Key bindings as stored in the user config, one key name per action
#[derive(Debug, Clone, PartialEq, DeRon, SerRon)]
pub struct InputConfig {
    pub key_forward: String,
    pub key_backward: String,
    pub key_left: String,
    pub key_right: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        InputConfig {
            key_forward: Key::W.name().to_owned(),
            key_backward: Key::S.name().to_owned(),
            key_left: Key::Left.name().to_owned(),
            key_right: Key::Right.name().to_owned(),
        }
    }
}

/// `InputConfig` with every name resolved to a `Key`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputBindings {
    pub(crate) key_forward: Key,
    pub(crate) key_backward: Key,
    pub(crate) key_left: Key,
    pub(crate) key_right: Key,
}

impl Default for InputBindings {
    fn default() -> Self {
        InputBindings {
            key_forward: Key::W,
            key_backward: Key::S,
            key_left: Key::Left,
            key_right: Key::Right,
        }
    }
}

impl TryFrom<&InputConfig> for InputBindings {
    type Error = InputError;

    fn try_from(i: &InputConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            key_forward: i.key_forward.parse()?,
            key_backward: i.key_backward.parse()?,
            key_left: i.key_left.parse()?,
            key_right: i.key_right.parse()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_agree() {
        let cfg = InputConfig::default();
        assert_eq!(
            InputBindings::try_from(&cfg).unwrap(),
            InputBindings::default()
        );
    }

    #[test]
    fn ron_round_trip() {
        let cfg = InputConfig {
            key_forward: "up".to_owned(),
            key_backward: "down".to_owned(),
            key_left: "a".to_owned(),
            key_right: "d".to_owned(),
        };
        let text = cfg.serialize_ron();
        let back = InputConfig::deserialize_ron(&text).unwrap();
        assert_eq!(back, cfg);

        let keys = InputBindings::try_from(&back).unwrap();
        assert_eq!(keys.key_forward, Key::Up);
        assert_eq!(keys.key_left, Key::A);
    }

    #[test]
    fn unknown_key_name() {
        let cfg = InputConfig {
            key_forward: "hyper".to_owned(),
            ..Default::default()
        };
        assert!(matches!(
            InputBindings::try_from(&cfg),
            Err(InputError::UnknownKey(name)) if name == "hyper"
        ));
    }
}
