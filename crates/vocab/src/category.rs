//! Question categories

use std::fmt;

/// Question category recognized by keyword prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Generic questions ("what is", "how do")
    Question,
    /// "who is" questions
    WhoIs,
    /// "why is" questions
    WhyIs,
}

impl Category {
    /// All categories in classification order
    pub const ALL: [Category; 3] = [Category::Question, Category::WhoIs, Category::WhyIs];

    /// Resource name, shared by the `.voc` file and the dialog
    pub fn name(&self) -> &'static str {
        match self {
            Category::Question => "question",
            Category::WhoIs => "who.is",
            Category::WhyIs => "why.is",
        }
    }

    /// Dialog spoken when this category matches
    pub fn dialog(&self) -> &'static str {
        self.name()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
