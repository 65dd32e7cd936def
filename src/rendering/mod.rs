//! Map renderer: scene construction plus SVG, HTML and JSON adapters.

pub mod html;
pub mod map_data;
pub mod scene;
pub mod svg;

pub use html::scene_to_html;
pub use map_data::{build_map_data, MapData};
pub use scene::{render_scene, status_color, Scene, SceneOptions, StatusColor};
pub use svg::scene_to_svg;
