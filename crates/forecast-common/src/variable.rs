//! Display units and labels for forecast variable codes.

/// Display unit for a variable code. Unknown codes map to an empty unit.
pub fn unit_for(variable: &str) -> &'static str {
    match variable {
        "TMP" | "TMN" | "TMX" | "T1H" => "℃",
        "POP" | "REH" => "%",
        // Categorical codes are passed through for the client to decode
        "PTY" | "SKY" => "코드",
        "PCP" | "RN1" => "mm",
        "SNO" => "cm",
        "UUU" | "VVV" | "WSD" => "m/s",
        "WAV" => "M",
        "VEC" => "deg",
        _ => "",
    }
}

/// Human-readable label for a variable code.
pub fn describe(variable: &str) -> Option<&'static str> {
    let label = match variable {
        "TMP" => "1-hour temperature",
        "TMN" => "Daily minimum temperature",
        "TMX" => "Daily maximum temperature",
        "T1H" => "Temperature",
        "POP" => "Probability of precipitation",
        "PTY" => "Precipitation type",
        "PCP" => "1-hour precipitation",
        "RN1" => "1-hour precipitation",
        "REH" => "Relative humidity",
        "SNO" => "1-hour new snowfall",
        "SKY" => "Sky condition",
        "UUU" => "East-west wind component",
        "VVV" => "North-south wind component",
        "WAV" => "Wave height",
        "VEC" => "Wind direction",
        "WSD" => "Wind speed",
        _ => return None,
    };
    Some(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units() {
        assert_eq!(unit_for("TMP"), "℃");
        assert_eq!(unit_for("POP"), "%");
        assert_eq!(unit_for("PTY"), "코드");
        assert_eq!(unit_for("REH"), "%");
        assert_eq!(unit_for("WSD"), "m/s");
        assert_eq!(unit_for("VEC"), "deg");
    }

    #[test]
    fn test_unknown_variable_has_empty_unit() {
        assert_eq!(unit_for("XYZ"), "");
        assert_eq!(unit_for("tmp"), "");
        assert!(describe("XYZ").is_none());
    }

    #[test]
    fn test_every_described_code_has_a_unit() {
        for code in [
            "TMP", "TMN", "TMX", "T1H", "POP", "PTY", "PCP", "RN1", "REH", "SNO", "SKY", "UUU",
            "VVV", "WAV", "VEC", "WSD",
        ] {
            assert!(describe(code).is_some(), "{code} has no label");
            assert!(!unit_for(code).is_empty(), "{code} has no unit");
        }
    }
}
