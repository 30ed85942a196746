//! The fixed list of habits tracked every day.
//!
//! On disk a day is just [TASK_COUNT] unnamed flags, so the position of a habit in [HABITS] is
//! what ties a label to a column. Positions must never be reordered, otherwise old files would be
//! read with the wrong meaning.

use std::{collections::BTreeMap, fmt::Display};

use anyhow::{bail, Result};

/// Number of task columns in a record. One more than there are habits, the last slot is kept
/// unassigned so files stay compatible.
pub const TASK_COUNT: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Spirituality,
    MindAndDiscipline,
    CareerLearning,
    Money,
    Physique,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Spirituality,
        Category::MindAndDiscipline,
        Category::CareerLearning,
        Category::Money,
        Category::Physique,
    ];
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Spirituality => write!(f, "Spirituality"),
            Category::MindAndDiscipline => write!(f, "Mind & Discipline"),
            Category::CareerLearning => write!(f, "Career / Learning"),
            Category::Money => write!(f, "Money"),
            Category::Physique => write!(f, "Physique"),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Habit {
    /// Short name used on the command line.
    pub id: &'static str,
    pub label: &'static str,
    pub category: Category,
    /// 1-based column number, `Task_{position}` in the data file.
    pub position: usize,
}

const fn habit(
    position: usize,
    id: &'static str,
    label: &'static str,
    category: Category,
) -> Habit {
    Habit {
        id,
        label,
        category,
        position,
    }
}

pub static HABITS: [Habit; TASK_COUNT - 1] = [
    habit(1, "fajr", "Fajr", Category::Spirituality),
    habit(2, "dhuhr", "Dhuhr", Category::Spirituality),
    habit(3, "asr", "Asr", Category::Spirituality),
    habit(4, "maghrib", "Maghrib", Category::Spirituality),
    habit(5, "isha", "Isha", Category::Spirituality),
    habit(6, "quran", "Quran / Islamic reminder", Category::Spirituality),
    habit(7, "woke-on-time", "Woke up on time", Category::MindAndDiscipline),
    habit(8, "no-phone-first-30", "No phone first 30 mins", Category::MindAndDiscipline),
    habit(9, "planned-day", "Planned my day", Category::MindAndDiscipline),
    habit(10, "night-reflection", "Night reflection", Category::MindAndDiscipline),
    habit(11, "internship-task", "Internship task done well", Category::CareerLearning),
    habit(12, "skill-learning", "Skill learning", Category::CareerLearning),
    habit(13, "notes-practice", "Notes / practice done", Category::CareerLearning),
    habit(14, "outreach-dms", "Sent outreach DMs", Category::Money),
    habit(15, "worked-on-task", "Worked on a task", Category::Money),
    habit(16, "tracked-expenses", "Tracked expenses", Category::Money),
    habit(17, "workout", "Workout / walk", Category::Physique),
    habit(18, "water", "Drank enough water", Category::Physique),
    habit(19, "proper-meals", "Ate proper meals", Category::Physique),
];

pub fn find_by_id(id: &str) -> Option<&'static Habit> {
    HABITS.iter().find(|v| v.id.eq_ignore_ascii_case(id))
}

pub fn find_by_position(position: usize) -> Option<&'static Habit> {
    HABITS.iter().find(|v| v.position == position)
}

pub fn habits_in(category: Category) -> impl Iterator<Item = &'static Habit> {
    HABITS.iter().filter(move |v| v.category == category)
}

/// Positions that exist in the file but have no habit attached.
pub fn unassigned_positions() -> impl Iterator<Item = usize> {
    (1..=TASK_COUNT).filter(|position| find_by_position(*position).is_none())
}

/// Key of a single checklist entry. Unassigned slots can still be toggled by their number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TaskKey {
    Habit(&'static str),
    Slot(usize),
}

impl TaskKey {
    pub fn position(&self) -> usize {
        match self {
            TaskKey::Habit(id) => find_by_id(id)
                .map(|v| v.position)
                .expect("Habit keys are only created from the catalog"),
            TaskKey::Slot(position) => *position,
        }
    }

    pub fn at(position: usize) -> Self {
        match find_by_position(position) {
            Some(habit) => TaskKey::Habit(habit.id),
            None => TaskKey::Slot(position),
        }
    }
}

impl Display for TaskKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskKey::Habit(id) => write!(f, "{id}"),
            TaskKey::Slot(position) => write!(f, "#{position}"),
        }
    }
}

/// A day's answers keyed by habit rather than by column. Conversions to positional flags only
/// happen at the storage boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checklist {
    entries: BTreeMap<TaskKey, bool>,
}

impl Default for Checklist {
    fn default() -> Self {
        let entries = (1..=TASK_COUNT)
            .map(|position| (TaskKey::at(position), false))
            .collect();
        Self { entries }
    }
}

impl Checklist {
    /// Builds a checklist where only the `selection` is marked as done. Each item is either a
    /// habit id or a 1-based position.
    pub fn from_selection<S: AsRef<str>>(selection: &[S]) -> Result<Self> {
        let mut checklist = Self::default();
        for item in selection {
            let item = item.as_ref().trim();
            let key = match item.parse::<usize>() {
                Ok(position) if (1..=TASK_COUNT).contains(&position) => {
                    TaskKey::at(position)
                }
                Ok(position) => {
                    bail!("Position {position} is out of range, expected 1 to {TASK_COUNT}")
                }
                Err(_) => match find_by_id(item) {
                    Some(habit) => TaskKey::Habit(habit.id),
                    None => bail!("Unknown habit {item:?}. Run `habitual habits` to see the list"),
                },
            };
            checklist.entries.insert(key, true);
        }
        Ok(checklist)
    }

    pub fn from_tasks(tasks: &[bool; TASK_COUNT]) -> Self {
        let entries = tasks
            .iter()
            .enumerate()
            .map(|(index, done)| (TaskKey::at(index + 1), *done))
            .collect();
        Self { entries }
    }

    pub fn to_tasks(&self) -> [bool; TASK_COUNT] {
        let mut tasks = [false; TASK_COUNT];
        for (key, done) in &self.entries {
            tasks[key.position() - 1] = *done;
        }
        tasks
    }

    pub fn is_done(&self, key: TaskKey) -> bool {
        self.entries.get(&key).copied().unwrap_or(false)
    }

    pub fn done_count(&self) -> u32 {
        self.entries.values().filter(|v| **v).count() as u32
    }
}
