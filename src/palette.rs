use crate::model::Color;

const VIBRANT: [&str; 10] = [
    "cyan", "magenta", "lime", "amber", "violet", "emerald", "rose", "indigo", "orange", "teal",
];

/// Ordered mapping from semantic color names to color tokens. The n-th name
/// maps to `Color::new(n)`; visual styling stays with the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    names: Vec<String>,
}

impl Palette {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn vibrant() -> Self {
        Self::new(VIBRANT)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn color(&self, index: usize) -> Option<Color> {
        (index < self.names.len()).then(|| Color::new(index))
    }

    pub fn name_of(&self, color: Color) -> Option<&str> {
        self.names.get(color.id()).map(String::as_str)
    }

    pub fn color_named(&self, name: &str) -> Option<Color> {
        self.names.iter().position(|n| n == name).map(Color::new)
    }

    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        (0..self.names.len()).map(Color::new)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::vibrant()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_map_to_positional_colors() {
        let palette = Palette::vibrant();
        assert_eq!(palette.len(), 10);
        assert_eq!(palette.color_named("cyan"), Some(Color::new(0)));
        assert_eq!(palette.name_of(Color::new(9)), Some("teal"));
        assert_eq!(palette.name_of(Color::new(10)), None);
        assert_eq!(palette.color(10), None);
    }
}
