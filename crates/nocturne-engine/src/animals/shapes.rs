//! Hand-authored animal templates.
//!
//! Points live in unit space (0..1 on both axes, y down). Each stroke is an
//! ordered polyline; nodes are the highlight points that twinkle and shed
//! sparkles.

/// A point in unit shape space.
pub type ShapePoint = [f32; 2];

/// Static template shared by every instance of an animal.
#[derive(Debug, PartialEq)]
pub struct AnimalShape {
    pub name: &'static str,
    pub strokes: &'static [&'static [ShapePoint]],
    pub nodes: &'static [ShapePoint],
}

impl AnimalShape {
    pub fn point_count(&self) -> usize {
        self.strokes.iter().map(|s| s.len()).sum()
    }
}

pub static HUMMINGBIRD: AnimalShape = AnimalShape {
    name: "Colibrí",
    strokes: &[
        // body
        &[
            [0.45, 0.55],
            [0.50, 0.50],
            [0.55, 0.47],
            [0.60, 0.48],
            [0.62, 0.52],
            [0.60, 0.56],
            [0.54, 0.58],
            [0.49, 0.57],
        ],
        // head and beak
        &[[0.62, 0.52], [0.66, 0.50], [0.78, 0.47]],
        // upper wing
        &[
            [0.52, 0.50],
            [0.46, 0.40],
            [0.40, 0.33],
            [0.35, 0.31],
            [0.33, 0.34],
            [0.38, 0.40],
            [0.45, 0.47],
        ],
        // lower wing
        &[
            [0.48, 0.58],
            [0.42, 0.67],
            [0.38, 0.73],
            [0.36, 0.77],
            [0.40, 0.78],
            [0.46, 0.72],
            [0.50, 0.64],
        ],
        // tail
        &[[0.47, 0.60], [0.44, 0.66], [0.41, 0.72], [0.40, 0.76]],
    ],
    nodes: &[[0.62, 0.52], [0.50, 0.50], [0.46, 0.40], [0.40, 0.73]],
};

pub static FOX: AnimalShape = AnimalShape {
    name: "Zorro",
    strokes: &[
        &[
            [0.20, 0.60],
            [0.32, 0.58],
            [0.40, 0.54],
            [0.48, 0.48],
            [0.54, 0.40],
            [0.57, 0.32],
        ],
        &[[0.57, 0.32], [0.60, 0.40], [0.64, 0.46], [0.70, 0.52]],
        &[[0.70, 0.52], [0.76, 0.58], [0.80, 0.64], [0.82, 0.72]],
        &[
            [0.82, 0.72],
            [0.76, 0.74],
            [0.70, 0.72],
            [0.64, 0.70],
            [0.58, 0.72],
            [0.52, 0.76],
        ],
        &[
            [0.52, 0.76],
            [0.46, 0.72],
            [0.40, 0.66],
            [0.34, 0.62],
            [0.26, 0.60],
            [0.20, 0.60],
        ],
    ],
    nodes: &[[0.57, 0.32], [0.70, 0.52], [0.82, 0.72]],
};

pub static DOLPHIN: AnimalShape = AnimalShape {
    name: "Delfín",
    strokes: &[
        &[
            [0.20, 0.55],
            [0.30, 0.48],
            [0.42, 0.44],
            [0.55, 0.43],
            [0.66, 0.46],
            [0.76, 0.50],
            [0.84, 0.56],
        ],
        &[[0.42, 0.44], [0.36, 0.36], [0.32, 0.34]],
        &[[0.55, 0.43], [0.52, 0.48], [0.50, 0.52]],
        &[[0.76, 0.50], [0.82, 0.48], [0.88, 0.46]],
    ],
    nodes: &[[0.30, 0.48], [0.55, 0.43], [0.76, 0.50]],
};

pub static BUTTERFLY: AnimalShape = AnimalShape {
    name: "Mariposa",
    strokes: &[
        // body
        &[[0.50, 0.35], [0.50, 0.50], [0.50, 0.65]],
        &[
            [0.50, 0.45],
            [0.42, 0.38],
            [0.34, 0.36],
            [0.30, 0.41],
            [0.34, 0.47],
            [0.42, 0.50],
        ],
        &[
            [0.50, 0.55],
            [0.42, 0.58],
            [0.34, 0.63],
            [0.32, 0.70],
            [0.38, 0.73],
            [0.45, 0.66],
        ],
        &[
            [0.50, 0.45],
            [0.58, 0.38],
            [0.66, 0.36],
            [0.70, 0.41],
            [0.66, 0.47],
            [0.58, 0.50],
        ],
        &[
            [0.50, 0.55],
            [0.58, 0.58],
            [0.66, 0.63],
            [0.68, 0.70],
            [0.62, 0.73],
            [0.55, 0.66],
        ],
    ],
    nodes: &[[0.50, 0.50], [0.42, 0.38], [0.58, 0.38], [0.34, 0.63], [0.66, 0.63]],
};

pub static ELEPHANT: AnimalShape = AnimalShape {
    name: "Elefante",
    strokes: &[
        &[[0.25, 0.60], [0.40, 0.55], [0.55, 0.55], [0.64, 0.60]],
        // ear loop
        &[[0.48, 0.54], [0.46, 0.50], [0.44, 0.52], [0.46, 0.58], [0.48, 0.54]],
        // trunk
        &[[0.64, 0.60], [0.70, 0.62], [0.72, 0.66], [0.68, 0.70]],
        &[[0.36, 0.60], [0.36, 0.68]],
        &[[0.54, 0.60], [0.54, 0.70]],
    ],
    nodes: &[[0.46, 0.50], [0.36, 0.68], [0.54, 0.70]],
};

pub static LION: AnimalShape = AnimalShape {
    name: "León",
    strokes: &[
        // mane
        &[
            [0.45, 0.52],
            [0.46, 0.46],
            [0.50, 0.44],
            [0.54, 0.46],
            [0.56, 0.52],
            [0.54, 0.58],
            [0.50, 0.60],
            [0.46, 0.58],
            [0.45, 0.52],
        ],
        &[[0.50, 0.52], [0.54, 0.54]],
        &[[0.56, 0.56], [0.62, 0.58], [0.68, 0.60], [0.72, 0.64]],
        &[[0.72, 0.64], [0.76, 0.64], [0.78, 0.60]],
    ],
    nodes: &[[0.50, 0.44], [0.56, 0.56], [0.72, 0.64]],
};

static LIBRARY: [&AnimalShape; 6] = [&HUMMINGBIRD, &FOX, &DOLPHIN, &BUTTERFLY, &ELEPHANT, &LION];

/// Every shape, in display order.
pub fn library() -> &'static [&'static AnimalShape] {
    &LIBRARY
}

/// Look a shape up by its display name.
pub fn find(name: &str) -> Option<&'static AnimalShape> {
    LIBRARY.iter().copied().find(|s| s.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn library_order() {
        let names: Vec<&str> = library().iter().map(|s| s.name).collect();
        assert_eq!(names, ["Colibrí", "Zorro", "Delfín", "Mariposa", "Elefante", "León"]);
    }

    #[test]
    fn all_points_in_unit_space() {
        for shape in library() {
            assert!(!shape.strokes.is_empty(), "{} has no strokes", shape.name);
            assert!(!shape.nodes.is_empty(), "{} has no nodes", shape.name);
            for stroke in shape.strokes {
                assert!(stroke.len() >= 2, "{} has a degenerate stroke", shape.name);
            }
            let points = shape.strokes.iter().flat_map(|s| s.iter()).chain(shape.nodes.iter());
            for p in points {
                assert!((0.0..=1.0).contains(&p[0]) && (0.0..=1.0).contains(&p[1]));
            }
        }
    }

    #[test]
    fn find_by_name() {
        assert_eq!(find("Zorro").map(|s| s.point_count()), Some(26));
        assert!(find("Unicornio").is_none());
    }
}
