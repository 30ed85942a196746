//! Turning reports into text for the terminal.

pub mod report;

use std::fmt::{self, Write};

use ansi_term::{Colour, Style};

use crate::{
    habits::{habits_in, unassigned_positions, Category, Checklist, TaskKey, TASK_COUNT},
    utils::percentage::completion_percentage,
};

use report::DayReport;

/// Styling of the output. Plain mode only drops the colours, the content stays the same.
#[derive(Debug, Clone, Copy)]
pub struct OutputStyle {
    plain: bool,
}

impl OutputStyle {
    pub fn new(plain: bool) -> Self {
        Self { plain }
    }

    fn paint(&self, style: Style, text: impl AsRef<str>) -> String {
        if self.plain {
            text.as_ref().to_string()
        } else {
            style.paint(text.as_ref()).to_string()
        }
    }

    fn heading(&self, text: impl AsRef<str>) -> String {
        self.paint(Colour::Cyan.bold(), text)
    }

    fn checkbox(&self, done: bool) -> String {
        if done {
            self.paint(Colour::Green.bold(), "[x]")
        } else {
            self.paint(Style::new().dimmed(), "[ ]")
        }
    }
}

/// Renders the habit catalog grouped by category.
pub fn render_habits(style: OutputStyle) -> Result<String, fmt::Error> {
    let mut out = String::new();
    for category in Category::ALL {
        writeln!(out, "{}", style.heading(category.to_string()))?;
        for habit in habits_in(category) {
            writeln!(out, "  {:>2}  {:<20} {}", habit.position, habit.id, habit.label)?;
        }
    }
    let unassigned = unassigned_positions().collect::<Vec<_>>();
    if !unassigned.is_empty() {
        writeln!(out, "{}", style.heading("Unassigned"))?;
        for position in unassigned {
            writeln!(out, "  {position:>2}")?;
        }
    }
    Ok(out)
}

/// Renders a checklist for one day, followed by its score and the current streak.
pub fn render_day(
    report: &DayReport,
    checklist: &Checklist,
    style: OutputStyle,
) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let status = if report.saved { "" } else { " (not saved)" };
    writeln!(out, "{}{status}", style.heading(format!("Date: {}", report.date)))?;

    for category in Category::ALL {
        writeln!(out)?;
        writeln!(out, "{}", style.heading(category.to_string()))?;
        for habit in habits_in(category) {
            let done = checklist.is_done(TaskKey::Habit(habit.id));
            writeln!(out, "  {} {}", style.checkbox(done), habit.label)?;
        }
    }

    let extra = unassigned_positions()
        .filter(|position| checklist.is_done(TaskKey::Slot(*position)))
        .collect::<Vec<_>>();
    if !extra.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", style.heading("Unassigned"))?;
        for position in extra {
            writeln!(out, "  {} #{position}", style.checkbox(true))?;
        }
    }

    writeln!(out)?;
    out.push_str(&render_score(report.score, style));
    out.push_str(&render_streak(report.streak, style));
    Ok(out)
}

pub fn render_score(score: u32, style: OutputStyle) -> String {
    format!(
        "{} {score} / {TASK_COUNT} ({})\n",
        style.paint(Style::new().bold(), "Daily Score:"),
        completion_percentage(score, TASK_COUNT as u32)
    )
}

pub fn render_streak(streak: u32, style: OutputStyle) -> String {
    let unit = if streak == 1 { "day" } else { "days" };
    format!(
        "{} {streak} {unit}\n",
        style.paint(Colour::Yellow.bold(), "Current Streak:")
    )
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::habits::Checklist;

    use super::{
        render_day, render_habits, render_score, render_streak, report::DayReport, OutputStyle,
    };

    fn plain() -> OutputStyle {
        OutputStyle::new(true)
    }

    #[test]
    fn test_render_habits_lists_everything() {
        let text = render_habits(plain()).unwrap();
        assert!(text.contains("Mind & Discipline"));
        assert!(text.contains("no-phone-first-30"));
        assert!(text.contains("Ate proper meals"));
        assert!(text.contains("Unassigned"));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn test_render_day() -> anyhow::Result<()> {
        let checklist = Checklist::from_selection(&["fajr", "20"])?;
        let report = DayReport {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            saved: true,
            score: 2,
            total: 20,
            streak: 1,
            done: vec!["fajr".into(), "#20".into()],
            message: None,
        };

        let text = render_day(&report, &checklist, plain())?;

        assert!(text.starts_with("Date: 2024-01-02\n"));
        assert!(text.contains("  [x] Fajr\n"));
        assert!(text.contains("  [ ] Dhuhr\n"));
        assert!(text.contains("  [x] #20\n"));
        assert!(text.contains("Daily Score: 2 / 20 (10%)"));
        assert!(text.contains("Current Streak: 1 day\n"));
        Ok(())
    }

    #[test]
    fn test_unsaved_day_is_marked() {
        let report = DayReport {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            saved: false,
            score: 0,
            total: 20,
            streak: 0,
            done: vec![],
            message: None,
        };
        let text = render_day(&report, &Checklist::default(), plain()).unwrap();
        assert!(text.starts_with("Date: 2024-01-02 (not saved)\n"));
        assert!(!text.contains("Unassigned"));
    }

    #[test]
    fn test_colours_can_be_enabled() {
        assert!(render_score(5, OutputStyle::new(false)).contains('\u{1b}'));
        assert_eq!(render_streak(3, plain()), "Current Streak: 3 days\n");
    }
}
