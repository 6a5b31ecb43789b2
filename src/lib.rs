pub mod block;
pub mod connectivity;
pub mod error;
pub mod export;
pub mod face;
pub mod face_match;
pub mod ogrid;
pub mod overlap;
pub mod periodic;
pub mod predicates;
pub mod read;
pub mod utils;
pub mod write;

pub use block::Block;
pub use connectivity::{
    connectivity, connectivity_with, verify_connectivity, BlockRange, ConnectivityOptions,
    ConnectivityTable, FaceMatch, FaceMatchPrinter, IndexRange, MatchKind, DEFAULT_TOLERANCE,
};
pub use error::{ConnectivityError, ConnectivityResult};
pub use export::blocking_data_string;
pub use face::{extract_face, Axis, BlockFaces, BoundingBox, Face, FaceId};
pub use face_match::{match_faces, small_in_big, FaceSpan, MatchContext, MatchResult};
pub use ogrid::detect_self_wrap;
pub use overlap::{find_bound_point_in_line, find_part_in_face, find_point_in_lines};
pub use periodic::{
    create_rotation_matrix, match_periodic_faces, match_rotated_periodic_faces, rotate_block,
    PeriodicFaces,
};
pub use predicates::{
    curve_distance, faces_equal, faces_parallel, faces_rotated, nearest_point_in_face,
    points_equal,
};
pub use read::{read_plot3d_ascii, read_plot3d_binary};
pub use utils::{BinaryFormat, Endian, FloatPrecision};
pub use write::write_plot3d;
