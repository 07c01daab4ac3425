// Inputs carried from one interaction cycle to the next.
use crate::config::InputDefaults;
use engine::services::ComparisonRequest;

#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub selected_product: Option<String>,
    pub monthly_cases: f64,
    pub reference_price: f64,
    pub comparison_price: f64,
}

impl SessionState {
    pub fn new(defaults: &InputDefaults) -> Self {
        SessionState {
            selected_product: None,
            monthly_cases: defaults.monthly_cases,
            reference_price: defaults.reference_price,
            comparison_price: defaults.comparison_price,
        }
    }

    /// Index of the current selection in `choices`, first entry otherwise.
    pub fn selected_index(&self, choices: &[String]) -> usize {
        self.selected_product
            .as_ref()
            .and_then(|selected| choices.iter().position(|name| name == selected))
            .unwrap_or(0)
    }

    pub fn to_request(&self) -> Option<ComparisonRequest> {
        Some(ComparisonRequest {
            comparison_short_name: self.selected_product.clone()?,
            monthly_cases: self.monthly_cases,
            reference_price: self.reference_price,
            comparison_price: self.comparison_price,
        })
    }
}
