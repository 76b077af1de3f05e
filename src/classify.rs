//! Heuristic widget classifier
//!
//! Maps a tag name onto a widget archetype. The heuristic is an ordered table of rules
//! in three tiers, evaluated top to bottom with the first match winning:
//!
//! 1. exact equality
//! 2. suffix
//! 3. substring
//!
//! Tags matching nothing fall back to [`Archetype::Widget`]. Matching is case-insensitive
//! and total. The ordering is load-bearing: `radiobutton` ends with `button`, so the
//! `radiobutton` suffix rule is shadowed and such tags classify as push buttons.

use serde::Serialize;
use std::fmt;

/// Widget category assigned to a tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Archetype {
    PushButton,
    CheckBox,
    RadioButton,
    ComboBox,
    Slider,
    Label,
    ScrollView,
    TextField,
    Module,
    /// Fallback for tags no rule recognises
    Widget,
}

impl Archetype {
    /// Label used in identifiers and metadata
    pub fn label(&self) -> &'static str {
        match self {
            Archetype::PushButton => "PushButtonQT",
            Archetype::CheckBox => "CheckBoxQT",
            Archetype::RadioButton => "RadioButtonQT",
            Archetype::ComboBox => "ComboBoxQT",
            Archetype::Slider => "SliderQT",
            Archetype::Label => "LabelQT",
            Archetype::ScrollView => "ScrollViewQT",
            Archetype::TextField => "TextFieldQT",
            Archetype::Module => "ModuleQT",
            Archetype::Widget => "QWidget",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Anything that can assign an archetype label to a tag
pub trait Classifier {
    fn classify(&self, tag: &str) -> String;
}

impl<C: Classifier + ?Sized> Classifier for &C {
    fn classify(&self, tag: &str) -> String {
        (**self).classify(tag)
    }
}

/// Matching tier of a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    Exact,
    Suffix,
    Substring,
}

/// One `(pattern, archetype)` row of the rule table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub tier: Tier,
    pub pattern: &'static str,
    pub archetype: Archetype,
}

impl Rule {
    const fn new(tier: Tier, pattern: &'static str, archetype: Archetype) -> Self {
        Rule {
            tier,
            pattern,
            archetype,
        }
    }

    /// Test an already lowercased tag
    pub fn matches(&self, tag: &str) -> bool {
        match self.tier {
            Tier::Exact => tag == self.pattern,
            Tier::Suffix => tag.ends_with(self.pattern),
            Tier::Substring => tag.contains(self.pattern),
        }
    }
}

use Archetype::*;
use Tier::*;

/// The rule table, in evaluation order
pub const RULES: &[Rule] = &[
    Rule::new(Exact, "button", PushButton),
    Rule::new(Exact, "container", ScrollView),
    Rule::new(Exact, "form", Module),
    Rule::new(Exact, "textfield", TextField),
    Rule::new(Suffix, "button", PushButton),
    Rule::new(Suffix, "checkbox", CheckBox),
    Rule::new(Suffix, "radiobutton", RadioButton),
    Rule::new(Suffix, "combobox", ComboBox),
    Rule::new(Suffix, "slider", Slider),
    Rule::new(Suffix, "label", Label),
    Rule::new(Suffix, "view", ScrollView),
    Rule::new(Suffix, "field", TextField),
    Rule::new(Substring, "button", PushButton),
    Rule::new(Substring, "field", TextField),
    Rule::new(Substring, "text", TextField),
    Rule::new(Substring, "container", ScrollView),
    Rule::new(Substring, "panel", ScrollView),
    Rule::new(Substring, "form", Module),
];

/// Classifier backed by [`RULES`]
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicClassifier;

impl HeuristicClassifier {
    pub fn new() -> Self {
        HeuristicClassifier
    }

    /// The first rule matching `tag`, if any
    pub fn rule_for(&self, tag: &str) -> Option<&'static Rule> {
        let tag = tag.to_ascii_lowercase();
        RULES.iter().find(|rule| rule.matches(&tag))
    }

    pub fn archetype(&self, tag: &str) -> Archetype {
        self.rule_for(tag).map_or(Widget, |rule| rule.archetype)
    }
}

impl Classifier for HeuristicClassifier {
    fn classify(&self, tag: &str) -> String {
        self.archetype(tag).label().to_string()
    }
}
