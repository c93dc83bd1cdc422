use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro-sector vocabulary (closed). Declaration order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sector {
    #[serde(rename = "Tecnologia")]
    Technology,
    #[serde(rename = "Saúde")]
    Health,
    #[serde(rename = "Consumo")]
    Consumer,
    #[serde(rename = "Serviços Financeiros")]
    FinancialServices,
    #[serde(rename = "Agronegócio")]
    Agribusiness,
    #[serde(rename = "Educação")]
    Education,
    #[serde(rename = "Serviços")]
    Services,
    #[serde(rename = "Infraestrutura")]
    Infrastructure,
    #[serde(rename = "Industrial")]
    Industrial,
    #[serde(rename = "Logística")]
    Logistics,
    #[serde(rename = "Real Estate")]
    RealEstate,
    #[serde(rename = "Telecom")]
    Telecom,
}

impl Sector {
    pub const ALL: [Sector; 12] = [
        Sector::Technology,
        Sector::Health,
        Sector::Consumer,
        Sector::FinancialServices,
        Sector::Agribusiness,
        Sector::Education,
        Sector::Services,
        Sector::Infrastructure,
        Sector::Industrial,
        Sector::Logistics,
        Sector::RealEstate,
        Sector::Telecom,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Sector::Technology => "Tecnologia",
            Sector::Health => "Saúde",
            Sector::Consumer => "Consumo",
            Sector::FinancialServices => "Serviços Financeiros",
            Sector::Agribusiness => "Agronegócio",
            Sector::Education => "Educação",
            Sector::Services => "Serviços",
            Sector::Infrastructure => "Infraestrutura",
            Sector::Industrial => "Industrial",
            Sector::Logistics => "Logística",
            Sector::RealEstate => "Real Estate",
            Sector::Telecom => "Telecom",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim().to_lowercase();
        Sector::ALL
            .into_iter()
            .find(|s| s.label().to_lowercase() == label)
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ownership shape a fund accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DealType {
    #[serde(rename = "Controle")]
    Control,
    #[serde(rename = "Minoritário")]
    Minority,
    #[serde(rename = "Majoritário")]
    Majority,
    #[serde(rename = "Growth")]
    Growth,
    #[serde(rename = "VC")]
    VentureCapital,
}

impl DealType {
    pub fn label(self) -> &'static str {
        match self {
            DealType::Control => "Controle",
            DealType::Minority => "Minoritário",
            DealType::Majority => "Majoritário",
            DealType::Growth => "Growth",
            DealType::VentureCapital => "VC",
        }
    }

    /// Control / minority / majority describe the stake, not the stage.
    pub fn is_position(self) -> bool {
        matches!(self, DealType::Control | DealType::Minority | DealType::Majority)
    }
}

impl fmt::Display for DealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Join deal types the way the dashboard shows them ("Controle, Growth").
pub fn join_deal_types(types: &[DealType]) -> Option<String> {
    if types.is_empty() {
        return None;
    }
    Some(
        types
            .iter()
            .map(|t| t.label())
            .collect::<Vec<_>>()
            .join(", "),
    )
}
