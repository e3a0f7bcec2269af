// notes.rs

/// A note length expressed relative to one quarter-note beat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteDivision {
    pub label: &'static str,
    pub factor: f64,
}

/// Rendered top to bottom in this order.
pub const NOTE_DIVISIONS: [NoteDivision; 9] = [
    NoteDivision {
        label: "1 bar (4 beats)",
        factor: 4.0,
    },
    NoteDivision {
        label: "1/2 note",
        factor: 2.0,
    },
    NoteDivision {
        label: "1/4 note",
        factor: 1.0,
    },
    NoteDivision {
        label: "1/8 note",
        factor: 0.5,
    },
    NoteDivision {
        label: "1/16 note",
        factor: 0.25,
    },
    NoteDivision {
        label: "1/32 note",
        factor: 0.125,
    },
    NoteDivision {
        label: "1/64 note",
        factor: 0.0625,
    },
    NoteDivision {
        label: "1/128 note",
        factor: 0.03125,
    },
    NoteDivision {
        label: "1/256 note",
        factor: 0.015625,
    },
];
