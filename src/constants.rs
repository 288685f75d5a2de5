/// Fixed names shared by the renderers and the markup conversion layer

pub mod classes {
    /// CSS class for correctly produced characters
    pub const CORRECT: &str = "highlight-green";

    /// CSS class for substituted characters
    pub const SUBSTITUTED: &str = "highlight-red";

    /// CSS class for omitted runs reinserted into the display
    pub const OMITTED: &str = "highlight-yellow";

    /// CSS class for every slot of the expected row
    pub const EXPECTED: &str = "expected";

    /// Run type for text outside any highlight span
    pub const NORMAL: &str = "normal";
}

pub mod colors {
    /// Inline colors used when class-based styling is disabled
    pub const CORRECT: &str = "green";
    pub const SUBSTITUTED: &str = "red";
    pub const OMITTED: &str = "yellow";
}

pub mod markers {
    /// Default pause marker preserved between phonetic tokens
    pub const PAUSE: &str = "-";

    /// Default HTML placeholder keeping the expected row aligned
    pub const HTML_BLANK: &str = "&nbsp;";

    /// Plain-text placeholder for correct slots in the expected row
    pub const TEXT_BLANK: char = ' ';
}
