#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Swatch {
    red: u8,
    green: u8,
    blue: u8,
    population: u32,
}

impl Swatch {
    pub fn new((red, green, blue): (u8, u8, u8), population: u32) -> Swatch {
        Self {
            red,
            green,
            blue,
            population,
        }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        (self.red, self.green, self.blue)
    }

    pub fn hsl(self) -> (f32, f32, f32) {
        crate::rgb_to_hsl(self.rgb())
    }

    pub fn population(self) -> u32 {
        self.population
    }

    /// The color as `#rrggbb`, two lowercase hex digits per channel.
    pub fn hex(self) -> String {
        to_hex(self.rgb())
    }
}

pub(crate) fn to_hex((r, g, b): (u8, u8, u8)) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_lowercase_and_zero_padded() {
        assert_eq!(Swatch::new((255, 0, 0), 1).hex(), "#ff0000");
        assert_eq!(Swatch::new((1, 10, 171), 1).hex(), "#010aab");
    }

    #[test]
    fn equality_includes_population() {
        assert_ne!(Swatch::new((1, 2, 3), 1), Swatch::new((1, 2, 3), 2));
        assert_eq!(Swatch::new((1, 2, 3), 1).rgb(), Swatch::new((1, 2, 3), 2).rgb());
    }
}
