use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One input on a calculator page.
///
/// `default` is the text the field holds before the user touches it and
/// `step` is the granularity hint for numeric inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub default: &'static str,
    pub step: Option<&'static str>,
}

impl FieldSpec {
    const fn new(
        name: &'static str,
        label: &'static str,
        default: &'static str,
    ) -> Self {
        Self {
            name,
            label,
            default,
            step: None,
        }
    }

    const fn with_step(
        mut self,
        step: &'static str,
    ) -> Self {
        self.step = Some(step);
        self
    }

    /// Decimal places the input accepts: those of `step`, widened to fit
    /// the default so the pre-filled value is always representable.
    pub fn fraction_digits(&self) -> usize {
        let places = |s: &str| s.split_once('.').map_or(0, |(_, frac)| frac.len());
        self.step.map_or(0, places).max(places(self.default))
    }
}

const WIRELESS_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("bandwidth", "Bandwidth (Hz)", "4000"),
    FieldSpec::new("quantizerBits", "Quantizer Bits", "8"),
    FieldSpec::new(
        "sourceCoderRate",
        "Source Coder Rate (e.g., 0.25 for 4:1 compression)",
        "0.25",
    )
    .with_step("0.01"),
    FieldSpec::new(
        "channelCoderRate",
        "Channel Coder Rate (e.g., 0.5 for rate-1/2)",
        "0.5",
    )
    .with_step("0.01"),
    FieldSpec::new("burstSizeBits", "Burst Format Size (bits)", "2048"),
];

const OFDM_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("modulationOrder", "Modulation Order (e.g., 64)", "64"),
    FieldSpec::new("rbBw", "Resource Block Bandwidth (kHz)", "180"),
    FieldSpec::new("subcarrierSpacing", "Subcarrier Spacing (kHz)", "15"),
    FieldSpec::new("symbolsPerRb", "OFDM Symbols per RB", "7"),
    FieldSpec::new("parallelRbs", "Parallel Resource Blocks", "100"),
    FieldSpec::new("rbDurationMs", "Resource Block Duration (ms)", "0.5").with_step("0.01"),
];

const LINK_BUDGET_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("dataRateBps", "Data Rate (bps)", "1000000"),
    FieldSpec::new("systemTempK", "System Temperature (K)", "290"),
    FieldSpec::new("noiseFigureDb", "Receiver Noise Figure (dB)", "3"),
    FieldSpec::new("ebNoDb", "Required Eb/No (dB)", "10"),
    FieldSpec::new("fadeMarginDb", "Fade Margin (dB)", "10"),
    FieldSpec::new("pathLossDb", "Path Loss (dB)", "120"),
    FieldSpec::new("txGainDbi", "Transmit Antenna Gain (dBi)", "5"),
    FieldSpec::new("rxGainDbi", "Receive Antenna Gain (dBi)", "5"),
    FieldSpec::new("otherLossesDb", "Other Losses (dB)", "2"),
];

const CELLULAR_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("totalAreaSqkm", "Total Coverage Area (km²)", "1000"),
    FieldSpec::new("cellRadiusKm", "Cell Radius (km)", "2"),
    FieldSpec::new("numSubscribers", "Number of Subscribers", "50000"),
    FieldSpec::new("callsPerHour", "Avg. Calls per User per Hour", "2"),
    FieldSpec::new("callDurationMin", "Avg. Call Duration (minutes)", "1.5"),
    FieldSpec::new(
        "blockingProb",
        "Desired Blocking Probability (e.g., 0.02 for 2%)",
        "0.02",
    )
    .with_step("0.001"),
    FieldSpec::new("sirDb", "Required SIR (dB)", "9"),
    FieldSpec::new("pathLossExp", "Path Loss Exponent", "4"),
];

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown calculator '{input}'; expected one of: {}", CalculatorKind::slugs().join(", "))]
pub struct ParseCalculatorError {
    input: String,
}

/// The four calculator pages, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalculatorKind {
    WirelessSystem,
    Ofdm,
    LinkBudget,
    CellularDesign,
}

impl CalculatorKind {
    pub const ALL: [CalculatorKind; 4] = [
        Self::WirelessSystem,
        Self::Ofdm,
        Self::LinkBudget,
        Self::CellularDesign,
    ];

    /// Route segment and API path segment for this page.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::WirelessSystem => "wireless-system",
            Self::Ofdm => "ofdm-systems",
            Self::LinkBudget => "link-budget",
            Self::CellularDesign => "cellular-design",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::WirelessSystem => "1. Wireless Communication System",
            Self::Ofdm => "2. OFDM System",
            Self::LinkBudget => "3. Link Budget",
            Self::CellularDesign => "4. Cellular System Design",
        }
    }

    pub fn nav_label(&self) -> &'static str {
        match self {
            Self::WirelessSystem => "Wireless Comm. System",
            Self::Ofdm => "OFDM System",
            Self::LinkBudget => "Link Budget",
            Self::CellularDesign => "Cellular System Design",
        }
    }

    pub fn route(&self) -> String {
        format!("/{}", self.slug())
    }

    /// Default endpoint path, joined onto the configured base URL.
    pub fn api_path(&self) -> String {
        format!("/api/{}", self.slug())
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            Self::WirelessSystem => WIRELESS_FIELDS,
            Self::Ofdm => OFDM_FIELDS,
            Self::LinkBudget => LINK_BUDGET_FIELDS,
            Self::CellularDesign => CELLULAR_FIELDS,
        }
    }

    pub fn field(
        &self,
        name: &str,
    ) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|f| f.name == name)
    }

    pub fn slugs() -> Vec<&'static str> {
        Self::ALL.iter().map(|k| k.slug()).collect()
    }
}

impl FromStr for CalculatorKind {
    type Err = ParseCalculatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().trim_start_matches('/').to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.slug() == wanted)
            .ok_or_else(|| ParseCalculatorError {
                input: s.to_string(),
            })
    }
}

impl fmt::Display for CalculatorKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.nav_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn field_names_match_endpoint_contract() {
        let names = |k: CalculatorKind| k.fields().iter().map(|f| f.name).collect::<Vec<_>>();

        assert_eq!(
            names(CalculatorKind::WirelessSystem),
            vec![
                "bandwidth",
                "quantizerBits",
                "sourceCoderRate",
                "channelCoderRate",
                "burstSizeBits"
            ]
        );
        assert_eq!(
            names(CalculatorKind::Ofdm),
            vec![
                "modulationOrder",
                "rbBw",
                "subcarrierSpacing",
                "symbolsPerRb",
                "parallelRbs",
                "rbDurationMs"
            ]
        );
        assert_eq!(names(CalculatorKind::LinkBudget).len(), 9);
        assert_eq!(names(CalculatorKind::CellularDesign).len(), 8);
    }

    #[test]
    fn field_names_are_unique_per_page() {
        for kind in CalculatorKind::ALL {
            let unique: HashSet<_> = kind.fields().iter().map(|f| f.name).collect();
            assert_eq!(unique.len(), kind.fields().len(), "duplicate field on {kind}");
        }
    }

    #[test]
    fn defaults_match_published_values() {
        let lb = CalculatorKind::LinkBudget;
        assert_eq!(lb.field("dataRateBps").unwrap().default, "1000000");
        assert_eq!(lb.field("otherLossesDb").unwrap().default, "2");

        let cell = CalculatorKind::CellularDesign;
        assert_eq!(cell.field("blockingProb").unwrap().default, "0.02");
        assert_eq!(cell.field("blockingProb").unwrap().step, Some("0.001"));
        assert_eq!(cell.field("callDurationMin").unwrap().default, "1.5");
    }

    #[test]
    fn fraction_digits_follow_step_and_default() {
        let wireless = CalculatorKind::WirelessSystem;
        assert_eq!(wireless.field("sourceCoderRate").unwrap().fraction_digits(), 2);
        assert_eq!(wireless.field("bandwidth").unwrap().fraction_digits(), 0);

        let cell = CalculatorKind::CellularDesign;
        assert_eq!(cell.field("blockingProb").unwrap().fraction_digits(), 3);
        // No step, but the default carries one decimal.
        assert_eq!(cell.field("callDurationMin").unwrap().fraction_digits(), 1);
        assert_eq!(cell.field("sirDb").unwrap().fraction_digits(), 0);
    }

    #[test]
    fn parse_accepts_slug_and_route() {
        assert_eq!("ofdm-systems".parse(), Ok(CalculatorKind::Ofdm));
        assert_eq!("/Link-Budget".parse(), Ok(CalculatorKind::LinkBudget));
    }

    #[test]
    fn parse_error_lists_known_slugs() {
        let err = "ofdm".parse::<CalculatorKind>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("'ofdm'"));
        assert!(msg.contains("cellular-design"));
    }

    #[test]
    fn api_path_uses_slug() {
        assert_eq!(
            CalculatorKind::CellularDesign.api_path(),
            "/api/cellular-design"
        );
        assert_eq!(CalculatorKind::Ofdm.route(), "/ofdm-systems");
    }
}
