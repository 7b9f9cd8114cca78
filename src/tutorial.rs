//! Guided tutorials.
//!
//! A tutorial is a fixed list of steps. Entering a step (at start, and on
//! every `next`/`previous`) pushes the step's tool, color, shape and texture
//! into the editor. Completion flags are independent of navigation.

use serde::{Deserialize, Serialize};

const CATALOG_JSON: &str = include_str!("../assets/tutorials.json");

/// Receiver of the settings a tutorial step asks for. Values are passed as
/// the catalog spells them; the receiver resolves unknown names.
pub trait StepTarget {
    fn select_tool(&mut self, name: &str);
    fn select_color(&mut self, hex: &str);
    fn select_shape(&mut self, name: &str);
    fn select_texture(&mut self, name: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorialStep {
    pub title: String,
    pub description: String,
    pub action: String,
    #[serde(default)]
    pub tool_to_use: Option<String>,
    #[serde(default)]
    pub color_to_use: Option<String>,
    #[serde(default)]
    pub shape_to_use: Option<String>,
    #[serde(default)]
    pub texture_to_use: Option<String>,
}

impl TutorialStep {
    fn apply(&self, target: &mut dyn StepTarget) {
        if let Some(tool) = &self.tool_to_use {
            target.select_tool(tool);
        }
        if let Some(color) = &self.color_to_use {
            target.select_color(color);
        }
        if let Some(shape) = &self.shape_to_use {
            target.select_shape(shape);
        }
        if let Some(texture) = &self.texture_to_use {
            target.select_texture(texture);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tutorial {
    pub id: String,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub duration: String,
    pub steps: Vec<TutorialStep>,
}

/// The tutorials shipped with the app.
pub fn builtin_catalog() -> Result<Vec<Tutorial>, serde_json::Error> {
    serde_json::from_str(CATALOG_JSON)
}

/// Cursor over one running tutorial.
#[derive(Debug, Clone)]
pub struct TutorialPlayer {
    tutorial: Tutorial,
    current: usize,
    completed: Vec<bool>,
}

impl TutorialPlayer {
    /// Open `tutorial` on its first step and apply that step.
    pub fn start(tutorial: Tutorial, target: &mut dyn StepTarget) -> Self {
        log::info!("Starting tutorial {}", tutorial.id);
        let completed = vec![false; tutorial.steps.len()];
        let player = Self {
            tutorial,
            current: 0,
            completed,
        };
        player.enter(target);
        player
    }

    pub fn tutorial(&self) -> &Tutorial {
        &self.tutorial
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_step(&self) -> Option<&TutorialStep> {
        self.tutorial.steps.get(self.current)
    }

    pub fn step_count(&self) -> usize {
        self.tutorial.steps.len()
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.step_count()
    }

    /// Move forward. Returns false, changing nothing, on the last step.
    pub fn next(&mut self, target: &mut dyn StepTarget) -> bool {
        if self.is_last() {
            return false;
        }
        self.current += 1;
        self.enter(target);
        true
    }

    /// Move back. Returns false, changing nothing, on the first step.
    pub fn previous(&mut self, target: &mut dyn StepTarget) -> bool {
        if self.is_first() {
            return false;
        }
        self.current -= 1;
        self.enter(target);
        true
    }

    pub fn mark_complete(&mut self) {
        if let Some(flag) = self.completed.get_mut(self.current) {
            *flag = true;
        }
    }

    pub fn is_complete(&self, step: usize) -> bool {
        self.completed.get(step).copied().unwrap_or(false)
    }

    pub fn completed(&self) -> &[bool] {
        &self.completed
    }

    /// Fraction of the way through, counting the current step.
    pub fn progress(&self) -> f32 {
        if self.step_count() == 0 {
            return 1.0;
        }
        (self.current + 1) as f32 / self.step_count() as f32
    }

    /// End the tutorial. The cursor is gone afterwards.
    pub fn close(self) -> Tutorial {
        log::info!("Closed tutorial {}", self.tutorial.id);
        self.tutorial
    }

    fn enter(&self, target: &mut dyn StepTarget) {
        if let Some(step) = self.current_step() {
            log::debug!("Tutorial step {}: {}", self.current + 1, step.title);
            step.apply(target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl StepTarget for Recorder {
        fn select_tool(&mut self, name: &str) {
            self.calls.push(format!("tool:{name}"));
        }
        fn select_color(&mut self, hex: &str) {
            self.calls.push(format!("color:{hex}"));
        }
        fn select_shape(&mut self, name: &str) {
            self.calls.push(format!("shape:{name}"));
        }
        fn select_texture(&mut self, name: &str) {
            self.calls.push(format!("texture:{name}"));
        }
    }

    fn french() -> Tutorial {
        builtin_catalog()
            .unwrap()
            .into_iter()
            .find(|t| t.id == "french-manicure")
            .unwrap()
    }

    #[test]
    fn catalog_parses() {
        let catalog = builtin_catalog().unwrap();
        let ids: Vec<_> = catalog.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["french-manicure", "gradient-nails", "geometric-design"]);
        assert_eq!(catalog[2].difficulty, Difficulty::Advanced);
    }

    #[test]
    fn starting_applies_the_first_step() {
        let mut target = Recorder::default();
        TutorialPlayer::start(french(), &mut target);
        assert_eq!(target.calls, ["shape:round", "texture:glossy"]);
    }

    #[test]
    fn navigation_applies_each_step_entered() {
        let mut target = Recorder::default();
        let mut player = TutorialPlayer::start(french(), &mut target);
        target.calls.clear();

        assert!(player.next(&mut target));
        assert_eq!(target.calls, ["tool:brush", "color:#FDE4E1"]);

        target.calls.clear();
        assert!(player.previous(&mut target));
        assert_eq!(target.calls, ["shape:round", "texture:glossy"]);
    }

    #[test]
    fn progress_counts_the_current_step() {
        let mut target = Recorder::default();
        let mut player = TutorialPlayer::start(french(), &mut target);
        assert_eq!(player.progress(), 0.25);
        player.next(&mut target);
        assert_eq!(player.progress(), 0.5);
    }

    #[test]
    fn empty_tutorials_do_nothing() {
        let mut target = Recorder::default();
        let mut player = TutorialPlayer::start(
            Tutorial {
                steps: Vec::new(),
                ..french()
            },
            &mut target,
        );
        assert!(!player.next(&mut target));
        assert!(!player.previous(&mut target));
        player.mark_complete();
        assert!(player.completed().is_empty());
        assert!(target.calls.is_empty());
    }
}
