//! Built-in compounds
//!
//! Each table here indexes into the fixed vertex order of
//! [`VertexSet::generate`](crate::VertexSet::generate). The data is
//! immutable; [`CompoundKind::table`] hands out an owned copy.

use serde::{Deserialize, Serialize};

use crate::color::Rgba8;
use crate::distance::DistanceClass;
use crate::solid::SolidFamily;
use crate::subsolid::{Chirality, SubSolid, SubSolidKind};
use crate::table::{CompoundTable, FacePairing};

/// The compounds shipped with the kernel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompoundKind {
    /// Five cubes inscribed in the dodecahedron
    FiveCubes,
    /// Five right-handed tetrahedra inscribed in the dodecahedron
    FiveTetrahedra,
    /// Both chiral sets of five tetrahedra, with face pairings and the
    /// dodecahedron hull
    #[default]
    TenTetrahedra,
    /// The dodecahedron's twelve pentagons in four color classes
    Dodecahedron,
    /// The icosahedron as three orthogonal golden rectangles
    GoldenRectangles,
    /// The octahedron's eight triangles in four color classes
    Octahedron,
    /// The octahedron's companion cube, drawn with its 12 edges as hull
    Cube,
}

impl CompoundKind {
    pub const ALL: [CompoundKind; 7] = [
        CompoundKind::FiveCubes,
        CompoundKind::FiveTetrahedra,
        CompoundKind::TenTetrahedra,
        CompoundKind::Dodecahedron,
        CompoundKind::GoldenRectangles,
        CompoundKind::Octahedron,
        CompoundKind::Cube,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CompoundKind::FiveCubes => "five_cubes",
            CompoundKind::FiveTetrahedra => "five_tetrahedra",
            CompoundKind::TenTetrahedra => "ten_tetrahedra",
            CompoundKind::Dodecahedron => "dodecahedron",
            CompoundKind::GoldenRectangles => "golden_rectangles",
            CompoundKind::Octahedron => "octahedron",
            CompoundKind::Cube => "cube",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.name() == name)
    }

    /// Host solid of the compound
    pub fn family(self) -> SolidFamily {
        match self {
            CompoundKind::GoldenRectangles => SolidFamily::Icosahedron,
            CompoundKind::Octahedron => SolidFamily::Octahedron,
            CompoundKind::Cube => SolidFamily::Cube,
            _ => SolidFamily::Dodecahedron,
        }
    }

    /// Total number of faces the compound draws
    pub fn expected_faces(self) -> usize {
        match self {
            CompoundKind::FiveCubes => 30,
            CompoundKind::FiveTetrahedra => 20,
            CompoundKind::TenTetrahedra => 40,
            CompoundKind::Dodecahedron => 12,
            CompoundKind::GoldenRectangles => 3,
            CompoundKind::Octahedron => 8,
            CompoundKind::Cube => 6,
        }
    }

    /// Build the decomposition table
    pub fn table(self) -> CompoundTable {
        match self {
            CompoundKind::FiveCubes => five_cubes(),
            CompoundKind::FiveTetrahedra => five_tetrahedra(),
            CompoundKind::TenTetrahedra => ten_tetrahedra(),
            CompoundKind::Dodecahedron => dodecahedron(),
            CompoundKind::GoldenRectangles => golden_rectangles(),
            CompoundKind::Octahedron => octahedron(),
            CompoundKind::Cube => cube(),
        }
    }
}

// Five cubes: each group is one cube on 8 dodecahedron vertices

const CUBES: [(&str, Rgba8, [[usize; 4]; 6]); 5] = [
    (
        "red",
        Rgba8::RED,
        [[0, 1, 2, 3], [4, 5, 6, 7], [0, 1, 5, 4], [1, 2, 6, 5], [2, 3, 7, 6], [3, 0, 4, 7]],
    ),
    (
        "green",
        Rgba8::GREEN,
        [[13, 17, 6, 11], [0, 9, 15, 19], [13, 17, 9, 0], [17, 6, 15, 9], [6, 11, 19, 15], [11, 13, 0, 19]],
    ),
    (
        "blue",
        Rgba8::BLUE,
        [[15, 2, 10, 18], [8, 16, 13, 4], [15, 2, 16, 8], [2, 10, 13, 16], [10, 18, 4, 13], [18, 15, 8, 4]],
    ),
    (
        "orange",
        Rgba8::ORANGE,
        [[12, 17, 5, 8], [3, 10, 14, 19], [12, 17, 10, 3], [17, 5, 14, 10], [5, 8, 19, 14], [8, 12, 3, 19]],
    ),
    (
        "yellow",
        Rgba8::YELLOW,
        [[16, 1, 9, 12], [11, 14, 18, 7], [16, 1, 14, 11], [1, 9, 18, 14], [9, 12, 7, 18], [12, 16, 11, 7]],
    ),
];

// Tetrahedra on the dodecahedron, four triangular faces each

const RIGHT_TETRAHEDRA: [(&str, Rgba8, [[usize; 3]; 4]); 5] = [
    ("red", Rgba8::RED, [[10, 19, 5], [10, 19, 12], [10, 5, 12], [19, 5, 12]]),
    ("blue", Rgba8::BLUE, [[2, 18, 13], [2, 18, 8], [2, 13, 8], [18, 13, 8]]),
    ("orange", Rgba8::ORANGE, [[11, 15, 0], [11, 15, 17], [11, 0, 17], [15, 0, 17]]),
    ("yellow", Rgba8::YELLOW, [[14, 7, 16], [14, 7, 9], [14, 16, 9], [16, 7, 9]]),
    ("green", Rgba8::GREEN, [[6, 3, 1], [6, 3, 4], [6, 1, 4], [1, 3, 4]]),
];

const LEFT_TETRAHEDRA: [(&str, Rgba8, [[usize; 3]; 4]); 5] = [
    ("magenta", Rgba8::MAGENTA, [[2, 7, 0], [2, 7, 5], [7, 5, 0], [2, 5, 0]]),
    ("cyan", Rgba8::CYAN, [[11, 18, 1], [18, 1, 12], [11, 1, 12], [11, 18, 12]]),
    ("purple", Rgba8::PURPLE, [[14, 3, 8], [14, 3, 17], [3, 17, 8], [14, 17, 8]]),
    ("lime", Rgba8::LIME, [[15, 16, 4], [10, 16, 4], [10, 15, 4], [10, 15, 16]]),
    ("azure", Rgba8::AZURE, [[6, 13, 9], [6, 19, 9], [6, 19, 13], [19, 13, 9]]),
];

/// Every right-handed face with the left-handed face in its plane
const TETRAHEDRON_PAIRINGS: [([usize; 3], [usize; 3]); 20] = [
    ([10, 19, 5], [11, 18, 1]),
    ([10, 19, 12], [2, 7, 0]),
    ([10, 5, 12], [6, 13, 9]),
    ([19, 5, 12], [15, 16, 4]),
    ([11, 15, 17], [2, 7, 5]),
    ([11, 15, 0], [14, 3, 8]),
    ([11, 17, 0], [10, 16, 4]),
    ([15, 17, 0], [18, 1, 12]),
    ([2, 18, 13], [14, 3, 17]),
    ([2, 18, 8], [6, 19, 9]),
    ([2, 13, 8], [11, 1, 12]),
    ([18, 13, 8], [7, 5, 0]),
    ([14, 7, 16], [6, 19, 13]),
    ([14, 7, 9], [10, 15, 4]),
    ([14, 16, 9], [2, 5, 0]),
    ([7, 16, 9], [3, 17, 8]),
    ([6, 3, 1], [10, 15, 16]),
    ([6, 3, 4], [11, 18, 12]),
    ([6, 1, 4], [14, 17, 8]),
    ([3, 1, 4], [19, 13, 9]),
];

/// The dodecahedron's 30 edges
const DODECAHEDRON_HULL: [(usize, usize); 30] = [
    (10, 11), (11, 2), (2, 14), (14, 6), (6, 10),
    (1, 15), (15, 5), (5, 18), (18, 17), (17, 7),
    (7, 13), (13, 3), (3, 16), (16, 19), (19, 1),
    (0, 12), (12, 4), (4, 9), (9, 8), (8, 0),
    (1, 8), (5, 9), (17, 4), (13, 12), (16, 0),
    (19, 2), (15, 14), (18, 6), (7, 10), (3, 11),
];

const PENTAGONS: [(&str, Rgba8, [[usize; 5]; 3]); 4] = [
    ("blue", Rgba8::DARK_BLUE, [[0, 8, 9, 4, 12], [13, 7, 10, 11, 3], [19, 2, 14, 15, 1]]),
    ("orange", Rgba8::ORANGE, [[0, 12, 13, 3, 16], [8, 1, 15, 5, 9], [17, 18, 6, 10, 7]]),
    ("red", Rgba8::DARK_RED, [[12, 4, 17, 7, 13], [16, 3, 11, 2, 19], [15, 14, 6, 18, 5]]),
    ("yellow", Rgba8::OLIVE, [[0, 16, 19, 1, 8], [9, 5, 18, 17, 4], [11, 10, 6, 14, 2]]),
];

const GOLDEN_RECTANGLES: [(&str, Rgba8, [usize; 4]); 3] = [
    ("x", Rgba8::RED, [0, 1, 2, 3]),
    ("y", Rgba8::GREEN, [4, 5, 6, 7]),
    ("z", Rgba8::BLUE, [8, 9, 10, 11]),
];

/// The icosahedron's 30 edges
const ICOSAHEDRON_HULL: [(usize, usize); 30] = [
    (2, 10), (10, 6), (6, 2), (2, 9), (2, 7), (2, 1),
    (10, 5), (10, 3), (10, 9), (9, 3), (9, 4), (9, 7),
    (1, 6), (1, 11), (1, 8), (1, 7), (6, 11), (6, 5),
    (5, 11), (5, 0), (5, 3), (3, 0), (3, 4), (7, 4),
    (7, 8), (8, 0), (0, 4), (4, 8), (8, 11), (11, 0),
];

const OCTAHEDRON_TRIANGLES: [(&str, Rgba8, [[usize; 3]; 2]); 4] = [
    ("blue", Rgba8::DARK_BLUE, [[0, 1, 2], [3, 5, 4]]),
    ("orange", Rgba8::ORANGE, [[0, 2, 4], [3, 1, 5]]),
    ("red", Rgba8::DARK_RED, [[0, 5, 1], [3, 4, 2]]),
    ("yellow", Rgba8::OLIVE, [[0, 4, 5], [3, 2, 1]]),
];

fn five_cubes() -> CompoundTable {
    CUBES.iter().fold(
        CompoundTable::new("five cubes", SolidFamily::Dodecahedron, 30),
        |table, (name, color, faces)| {
            table.with_group(SubSolid::new(*name, SubSolidKind::Cube, *color).with_faces(*faces))
        },
    )
}

fn tetrahedra(
    table: CompoundTable,
    sets: &[(&str, Rgba8, [[usize; 3]; 4])],
    chirality: Chirality,
) -> CompoundTable {
    sets.iter().fold(table, |table, (name, color, faces)| {
        table.with_group(
            SubSolid::new(*name, SubSolidKind::Tetrahedron, *color)
                .with_chirality(chirality)
                .with_faces(*faces),
        )
    })
}

fn five_tetrahedra() -> CompoundTable {
    tetrahedra(
        CompoundTable::new("five tetrahedra", SolidFamily::Dodecahedron, 20),
        &RIGHT_TETRAHEDRA,
        Chirality::Right,
    )
}

fn ten_tetrahedra() -> CompoundTable {
    let table = CompoundTable::new("ten tetrahedra", SolidFamily::Dodecahedron, 40)
        .with_hull(&DODECAHEDRON_HULL, DistanceClass::Minor);
    let table = tetrahedra(table, &RIGHT_TETRAHEDRA, Chirality::Right);
    let table = tetrahedra(table, &LEFT_TETRAHEDRA, Chirality::Left);
    TETRAHEDRON_PAIRINGS
        .iter()
        .fold(table, |table, &(right, left)| {
            table.with_pairing(FacePairing::new(right, left))
        })
}

fn dodecahedron() -> CompoundTable {
    PENTAGONS.iter().fold(
        CompoundTable::new("dodecahedron", SolidFamily::Dodecahedron, 12)
            .with_hull(&DODECAHEDRON_HULL, DistanceClass::Minor),
        |table, (name, color, faces)| {
            table.with_group(
                SubSolid::new(*name, SubSolidKind::PentagonPatch, *color).with_faces(*faces),
            )
        },
    )
}

fn golden_rectangles() -> CompoundTable {
    GOLDEN_RECTANGLES.iter().fold(
        CompoundTable::new("golden rectangles", SolidFamily::Icosahedron, 3)
            .with_hull(&ICOSAHEDRON_HULL, DistanceClass::Adjacent),
        |table, (name, color, face)| {
            table.with_group(
                SubSolid::new(*name, SubSolidKind::GoldenRectangle, *color).with_face(*face),
            )
        },
    )
}

fn octahedron() -> CompoundTable {
    OCTAHEDRON_TRIANGLES.iter().fold(
        CompoundTable::new("octahedron", SolidFamily::Octahedron, 8),
        |table, (name, color, faces)| {
            table.with_group(
                SubSolid::new(*name, SubSolidKind::TrianglePatch, *color).with_faces(*faces),
            )
        },
    )
}

// Cube family shares the dodecahedron's first eight vertices

const CUBE_FACES: [[usize; 4]; 6] = CUBES[0].2;

const CUBE_HULL: [(usize, usize); 12] = [
    (0, 1), (1, 2), (2, 3), (3, 0),
    (4, 5), (5, 6), (6, 7), (7, 4),
    (0, 4), (1, 5), (2, 6), (3, 7),
];

fn cube() -> CompoundTable {
    CompoundTable::new("cube", SolidFamily::Cube, 6)
        .with_group(SubSolid::new("cube", SubSolidKind::Cube, Rgba8::GRAY).with_faces(CUBE_FACES))
        .with_hull(&CUBE_HULL, DistanceClass::Adjacent)
}
