use clap::builder::styling::{AnsiColor, Color, Style};
use clap::builder::Styles;
use std::io::IsTerminal;

pub fn get_styles() -> Styles {
    clap::builder::Styles::styled()
        .usage(
            Style::new()
                .bold()
                .underline()
                .fg_color(Some(Color::Ansi(AnsiColor::Magenta))),
        )
        .header(
            Style::new()
                .bold()
                .underline()
                .fg_color(Some(Color::Ansi(AnsiColor::Magenta))),
        )
        .literal(Style::new().bold().fg_color(Some(Color::Ansi(AnsiColor::Green))))
        .invalid(Style::new().bold().fg_color(Some(Color::Ansi(AnsiColor::Red))))
        .error(Style::new().bold().fg_color(Some(Color::Ansi(AnsiColor::Red))))
        .valid(Style::new().bold().fg_color(Some(Color::Ansi(AnsiColor::Green))))
        .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightBlack))))
}

const TITLE: Style = Style::new().bold();
const DIMMED: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightBlack)));
const SUMMARY: Style = Style::new()
    .bold()
    .fg_color(Some(Color::Ansi(AnsiColor::Cyan)));

fn paint(style: Style, text: &str) -> String {
    if std::io::stdout().is_terminal() {
        format!("{}{}{}", style.render(), text, style.render_reset())
    } else {
        text.to_string()
    }
}

pub fn title(text: &str) -> String {
    paint(TITLE, text)
}

pub fn dimmed(text: &str) -> String {
    paint(DIMMED, text)
}

pub fn summary(text: &str) -> String {
    paint(SUMMARY, text)
}
