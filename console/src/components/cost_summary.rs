// Monthly cost lines: cases × price per pack × packs per case.
use super::{paint, Tone};
use shared::models::{ComparisonResult, ProductCost};
use shared::utils::format_grouped;

fn line(cost: &ProductCost, approx: bool) -> String {
    format!(
        "{}：{}{:.2}ケース × {:.0}円 × {}パック = {}円",
        cost.product.short_name,
        if approx { "約" } else { "" },
        cost.required_cases,
        cost.product.price_per_pack,
        cost.product.packs_per_case,
        format_grouped(cost.monthly_cost, 0),
    )
}

pub fn render(result: &ComparisonResult, color: bool) -> String {
    let mut out = String::new();
    out.push_str(&paint("📦 月間コスト比較", Tone::Heading, color));
    out.push('\n');
    out.push_str(&line(&result.comparison, false));
    out.push('\n');
    // Reference case count is derived, so it is shown as an estimate.
    out.push_str(&line(&result.reference, true));
    out.push('\n');
    out
}
