// Per-person daily cost table for both products.
use super::{paint, Tone};
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Color, ContentArrangement, Table};
use shared::models::{ComparisonResult, ProductCost};

const HEADERS: [&str; 5] = ["製品", "使用枚数", "単価（パック）", "枚数/パック", "1人1日コスト (円)"];

fn row(cost: &ProductCost, with_origin: bool) -> Vec<Cell> {
    let product = &cost.product;
    vec![
        Cell::new(product.display_label(with_origin)),
        Cell::new(format!("{:.2}", product.daily_usage)),
        Cell::new(format!("{:.1}", product.price_per_pack)),
        Cell::new(product.pack_size),
        Cell::new(format!("{:.2}", cost.daily_cost_per_person)),
    ]
}

fn build(result: &ComparisonResult, color: bool) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    if color {
        table.enforce_styling();
    } else {
        table.force_no_tty();
    }

    table.set_header(HEADERS.iter().map(|header| Cell::new(header).fg(Color::Cyan)));
    table.add_row(row(&result.reference, false));
    table.add_row(row(&result.comparison, true));

    // Product names left-aligned, figures right-aligned.
    for column in table.column_iter_mut().skip(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    table
}

pub fn render(result: &ComparisonResult, color: bool) -> String {
    format!(
        "{}\n{}\n",
        paint("📊 1人1日あたりのコスト", Tone::Heading, color),
        build(result, color)
    )
}
