use crate::{filter::Filter, swatch::Swatch};
use std::{
    cmp::Reverse,
    collections::{BinaryHeap, HashMap},
    sync::Arc,
};

type Rgb = (u8, u8, u8);

pub struct ColorCutQuantizer<'a> {
    pixels: &'a [Rgb],
    max_colors: usize,
    filters: &'a [Arc<dyn Filter>],
}

struct Vbox<'a> {
    colors: &'a mut [(Rgb, u32)],
    population: u32,
    red_range: (u8, u8),
    green_range: (u8, u8),
    blue_range: (u8, u8),
}

enum Component {
    Red,
    Green,
    Blue,
}

impl<'a> ColorCutQuantizer<'a> {
    pub fn new(pixels: &'a [Rgb], max_colors: usize, filters: &'a [Arc<dyn Filter>]) -> Self {
        Self {
            pixels,
            max_colors: max_colors.max(1),
            filters,
        }
    }

    pub fn get_quantized_colors(&self) -> Vec<Swatch> {
        // begin by generating a histogram of exact pixel values
        let mut hist = HashMap::new();
        for pixel in self.pixels {
            *hist.entry(*pixel).or_insert(0u32) += 1;
        }

        // convert the histogram into a collection of (color, count) tuples, filtering out unwanted colors
        let mut colors = hist
            .into_iter()
            .filter(|(rgb, _)| !self.should_ignore_color(*rgb))
            .collect::<Vec<_>>();

        // hash map iteration order is random, so give the colors a fixed order before anything depends on it
        colors.sort_by_key(|(rgb, _)| pack(*rgb));

        let mut swatches = if colors.len() <= self.max_colors {
            // there are no more colors than requested, just return each color as a swatch
            colors
                .into_iter()
                .map(|(rgb, count)| Swatch::new(rgb, count))
                .collect()
        } else {
            self.quantize_pixels(colors)
        };

        swatches.sort_by_key(|swatch| (Reverse(swatch.population()), pack(swatch.rgb())));
        swatches
    }

    fn quantize_pixels(&self, mut colors: Vec<(Rgb, u32)>) -> Vec<Swatch> {
        // create a priority queue of Vboxes with the first one containing all the given colors. the queue always pops
        // the largest Vbox by volume first
        let mut pq = BinaryHeap::with_capacity(self.max_colors);
        pq.push(Vbox::new(&mut colors));

        // go through the queue until there are enough colors or no more boxes to split
        self.split_boxes(&mut pq);

        // return the remaining Vboxes converting them into swatches, filtering out unwanted colors
        pq.iter()
            .map(Vbox::get_average_color)
            .filter(|swatch| !self.should_ignore_color(swatch.rgb()))
            .collect()
    }

    fn should_ignore_color(&self, rgb: Rgb) -> bool {
        if self.filters.is_empty() {
            return false;
        }

        let hsl = crate::rgb_to_hsl(rgb);
        self.filters.iter().any(|filter| !filter.is_allowed(rgb, hsl))
    }

    fn split_boxes(&self, pq: &mut BinaryHeap<Vbox<'_>>) {
        while pq.len() < self.max_colors {
            let Some(vbox) = pq.pop() else {
                return;
            };

            if !vbox.can_split() {
                // the largest box holds a single color, so every other box does too
                pq.push(vbox);
                return;
            }

            let (left, right) = vbox.split_box();
            pq.push(left);
            pq.push(right);
        }
    }
}

impl<'a> Vbox<'a> {
    fn new(colors: &'a mut [(Rgb, u32)]) -> Self {
        // compute the boundaries of the Vbox to tightly fit around the colors within it
        let mut population = 0;
        // min, max
        let (mut min_red, mut max_red) = (u8::MAX, 0);
        let (mut min_green, mut max_green) = (u8::MAX, 0);
        let (mut min_blue, mut max_blue) = (u8::MAX, 0);

        for ((r, g, b), count) in colors.iter() {
            population += count;

            min_red = min_red.min(*r);
            max_red = max_red.max(*r);
            min_green = min_green.min(*g);
            max_green = max_green.max(*g);
            min_blue = min_blue.min(*b);
            max_blue = max_blue.max(*b);
        }

        Self {
            colors,
            population,
            red_range: (min_red, max_red),
            green_range: (min_green, max_green),
            blue_range: (min_blue, max_blue),
        }
    }

    fn volume(&self) -> u32 {
        ((self.red_range.1 - self.red_range.0) as u32 + 1)
            * ((self.green_range.1 - self.green_range.0) as u32 + 1)
            * ((self.blue_range.1 - self.blue_range.0) as u32 + 1)
    }

    fn split_box(mut self) -> (Vbox<'a>, Vbox<'a>) {
        // split the Vbox at the population median of its largest color dimension
        debug_assert!(self.can_split());

        // sort the colors by the longest dimension so the median can be searched for
        self.sort_colors_by_longest_dimension();

        let split_point = self.find_split_point();
        let (old, new) = self.colors.split_at_mut(split_point);

        (Vbox::new(old), Vbox::new(new))
    }

    fn sort_colors_by_longest_dimension(&mut self) {
        let longest_dimension = self.get_longest_dimension();

        // stable sort keeps the packed-rgb order among colors sharing the channel value
        self.colors.sort_by_key(|((r, g, b), _)| match longest_dimension {
            Component::Red => *r,
            Component::Green => *g,
            Component::Blue => *b,
        });
    }

    fn find_split_point(&self) -> usize {
        let midpoint = self.population / 2;
        let mut pop = 0;

        // keep a total sum of all the color populations; the color that crosses the midpoint closes the first half
        for (i, (_, count)) in self.colors.iter().enumerate() {
            pop += count;

            if pop >= midpoint {
                // always leave at least one color on each side
                return (i + 1).clamp(1, self.colors.len() - 1);
            }
        }

        1
    }

    fn can_split(&self) -> bool {
        self.colors.len() > 1
    }

    fn get_longest_dimension(&self) -> Component {
        let red_length = self.red_range.1 - self.red_range.0;
        let green_length = self.green_range.1 - self.green_range.0;
        let blue_length = self.blue_range.1 - self.blue_range.0;

        if red_length >= green_length && red_length >= blue_length {
            Component::Red
        } else if green_length >= red_length && green_length >= blue_length {
            Component::Green
        } else {
            Component::Blue
        }
    }

    fn get_average_color(&self) -> Swatch {
        // population-weighted sums of each channel
        let (pop, red_sum, green_sum, blue_sum) = self.colors.iter().fold(
            (0u64, 0u64, 0u64, 0u64),
            |(pop, red_sum, green_sum, blue_sum), ((r, g, b), count)| {
                let count = *count as u64;

                (
                    pop + count,
                    red_sum + *r as u64 * count,
                    green_sum + *g as u64 * count,
                    blue_sum + *b as u64 * count,
                )
            },
        );

        let mean = |sum: u64| ((sum as f64 / pop as f64).round() as u8);

        Swatch::new((mean(red_sum), mean(green_sum), mean(blue_sum)), self.population)
    }
}

impl Eq for Vbox<'_> {}
impl PartialEq for Vbox<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.volume() == other.volume()
    }
}

impl Ord for Vbox<'_> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.volume().cmp(&other.volume())
    }
}

impl PartialOrd for Vbox<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

fn pack((r, g, b): Rgb) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}
