//! Gateway editions.

/// Product tier the gateway boots as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GatewayEdition {
    /// Standard edition (default).
    #[default]
    Standard,
    /// Edge edition.
    Edge,
    /// Maker edition.
    Maker,
}

impl GatewayEdition {
    /// Value passed to the image as `IGNITION_EDITION`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Edge => "edge",
            Self::Maker => "maker",
        }
    }
}

impl std::fmt::Display for GatewayEdition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for GatewayEdition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "edge" => Ok(Self::Edge),
            "maker" => Ok(Self::Maker),
            _ => Err(format!(
                "invalid gateway edition '{}', expected 'standard', 'edge' or 'maker'",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edition_strings() {
        assert_eq!(GatewayEdition::default(), GatewayEdition::Standard);
        assert_eq!(GatewayEdition::Maker.to_string(), "maker");
        assert_eq!("Edge".parse::<GatewayEdition>(), Ok(GatewayEdition::Edge));
        assert!("enterprise".parse::<GatewayEdition>().is_err());
    }
}
