// Recommendation banner, error messages and the data-source footer.
use super::{paint, Tone};
use chrono::{DateTime, Utc};
use engine::EngineError;
use shared::models::ComparisonResult;
use shared::utils::format_grouped;

pub fn render(result: &ComparisonResult, reference_name: &str, color: bool) -> String {
    let diff = format_grouped(result.diff, 0);
    let (headline, verdict, tone) = if result.recommendation.is_reduction() {
        (
            format!("差額：{}円（約{:.1}% 削減の見込み）", diff, result.rate),
            format!("✅ {}はコスト削減につながる可能性があります。", reference_name),
            Tone::Success,
        )
    } else {
        (
            format!("差額：{}円（約{:.1}% 増加）", diff, result.rate),
            format!("⚠️ {}は削減効果が見られません。使用条件をご確認ください。", reference_name),
            Tone::Warning,
        )
    };
    format!("{}\n{}\n", paint(&headline, tone, color), paint(&verdict, tone, color))
}

pub fn render_error(err: &EngineError, color: bool) -> String {
    let message = match err {
        EngineError::NoProducts => "使用可能な略符データがありません。".to_string(),
        EngineError::SourceNotFound { path } => format!("データファイルが見つかりません: {}", path.display()),
        EngineError::MissingColumns { columns } => format!("必要な列が見つかりません: {}", columns.join(", ")),
        other => format!("エラー: {}", other),
    };
    let mut out = paint(&message, Tone::Error, color);
    out.push('\n');
    if err.is_data_error() {
        out.push_str(&paint("データを修正後、r で再読み込みしてください。", Tone::Muted, color));
        out.push('\n');
    }
    out
}

pub fn render_footer(source: &str, loaded_at: Option<DateTime<Utc>>, version: &str, color: bool) -> String {
    let loaded = loaded_at
        .map(|ts| ts.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "未読込".to_string());
    let caption = format!("データ: {}（読込: {}） ver {} - 使える回数ベースでケース数を算出", source, loaded, version);
    format!("{}\n", paint(&caption, Tone::Muted, color))
}
