//! `--set ID.FIELD=VALUE` input overrides

use alliance_economics::AssetId;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct InputOverride {
    pub asset: AssetId,
    pub field: String,
    pub value: f64,
}

impl fmt::Display for InputOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}={}", self.asset, self.field, self.value)
    }
}

/// Parse `1.assetPrice=2.5`. Asset 0 is the native asset.
pub fn parse_override(arg: &str) -> Result<InputOverride, String> {
    let (target, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected ID.FIELD=VALUE, got '{}'", arg))?;
    let (asset, field) = target
        .split_once('.')
        .ok_or_else(|| format!("expected ID.FIELD before '=', got '{}'", target))?;

    let asset = asset
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("invalid asset id: '{}'", asset))?;
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("invalid value: '{}'", value))?;
    let field = field.trim();
    if field.is_empty() {
        return Err("empty field name".to_string());
    }

    Ok(InputOverride {
        asset: AssetId(asset),
        field: field.to_string(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_override() {
        let parsed = parse_override("1.assetPrice=2.5").unwrap();
        assert_eq!(parsed.asset, AssetId(1));
        assert_eq!(parsed.field, "assetPrice");
        assert_eq!(parsed.value, 2.5);
        assert_eq!(parsed.to_string(), "1.assetPrice=2.5");
    }

    #[test]
    fn test_parse_native_override() {
        let parsed = parse_override("0.inflationRate=0.1").unwrap();
        assert!(parsed.asset.is_native());
    }

    #[test]
    fn test_parse_negative_value() {
        // No clamping at the boundary either
        assert_eq!(parse_override("2.assetPrice=-1").unwrap().value, -1.0);
    }

    #[test]
    fn test_parse_invalid_overrides() {
        assert!(parse_override("assetPrice=2").is_err());
        assert!(parse_override("1.assetPrice").is_err());
        assert!(parse_override("x.assetPrice=2").is_err());
        assert!(parse_override("1.assetPrice=cheap").is_err());
        assert!(parse_override("1.=2").is_err());
    }
}
