// Interactive session: collect inputs, compare, render, repeat.
use crate::components::{banner, cost_summary, paint, results_table, Tone};
use crate::config::AppConfig;
use crate::input::Prompter;
use crate::state::SessionState;
use anyhow::Result;
use engine::services::ComparisonService;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Next {
    Continue,
    Quit,
}

pub struct App<R, W> {
    service: ComparisonService,
    state: SessionState,
    prompter: Prompter<R, W>,
    color: bool,
    version: String,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn new(service: ComparisonService, config: &AppConfig, input: R, output: W) -> Self {
        App {
            service,
            state: SessionState::new(&config.inputs),
            prompter: Prompter::new(input, output),
            color: config.display.color,
            version: config.version.clone(),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let title = format!("🧻 {} コスト比較", self.service.reference_short_name());
        writeln!(self.prompter.output(), "{}", paint(&title, Tone::Heading, self.color))?;
        while self.cycle()? == Next::Continue {}
        tracing::info!("Session finished");
        Ok(())
    }

    fn cycle(&mut self) -> Result<Next> {
        let choices = match self.service.choices() {
            Ok(choices) => choices,
            Err(e) => {
                let message = banner::render_error(&e, self.color);
                write!(self.prompter.output(), "{}", message)?;
                return self.next_action();
            }
        };

        let names: Vec<String> = choices.iter().map(|c| c.short_name.clone()).collect();
        let labels: Vec<String> = choices.iter().map(|c| c.label.clone()).collect();
        let current = self.state.selected_index(&names);
        let Some(selected) = self.prompter.choice("比較対象製品を選んでください", &labels, current)? else {
            return Ok(Next::Quit);
        };
        self.state.selected_product = Some(names[selected].clone());

        let Some(monthly_cases) = self.prompter.number("現在の出荷ケース数（月間）", self.state.monthly_cases)? else {
            return Ok(Next::Quit);
        };
        self.state.monthly_cases = monthly_cases;

        writeln!(self.prompter.output(), "{}", paint("単価入力（パックあたり）", Tone::Heading, self.color))?;
        let reference_label = format!("{} 単価", self.service.reference_short_name());
        let Some(reference_price) = self.prompter.number(&reference_label, self.state.reference_price)? else {
            return Ok(Next::Quit);
        };
        self.state.reference_price = reference_price;

        let comparison_label = format!("{} 単価", names[selected]);
        let Some(comparison_price) = self.prompter.number(&comparison_label, self.state.comparison_price)? else {
            return Ok(Next::Quit);
        };
        self.state.comparison_price = comparison_price;

        if let Some(request) = self.state.to_request() {
            let rendered = match self.service.compare(&request) {
                Ok(result) => {
                    let reference_name = self.service.reference_short_name().to_string();
                    format!(
                        "\n{}\n{}\n{}",
                        results_table::render(&result, self.color),
                        cost_summary::render(&result, self.color),
                        banner::render(&result, &reference_name, self.color),
                    )
                }
                Err(e) => banner::render_error(&e, self.color),
            };
            write!(self.prompter.output(), "{}", rendered)?;
        }

        let footer = banner::render_footer(
            &self.service.source_description(),
            self.service.loaded_at(),
            &self.version,
            self.color,
        );
        write!(self.prompter.output(), "{}", footer)?;
        self.next_action()
    }

    fn next_action(&mut self) -> Result<Next> {
        loop {
            let prompt = "[Enter] 再計算 / r: キャッシュをクリアして再読み込み / q: 終了 > ";
            let Some(answer) = self.prompter.read_line(prompt)? else {
                return Ok(Next::Quit);
            };
            match answer.as_str() {
                "" => return Ok(Next::Continue),
                "r" | "R" => {
                    self.service.invalidate();
                    let message = paint("キャッシュをクリアしました。データを再読み込みします。", Tone::Muted, self.color);
                    writeln!(self.prompter.output(), "{}", message)?;
                    return Ok(Next::Continue);
                }
                "q" | "Q" => return Ok(Next::Quit),
                other => writeln!(self.prompter.output(), "不明なコマンドです: '{}'", other)?,
            }
        }
    }
}
