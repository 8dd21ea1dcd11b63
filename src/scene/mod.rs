mod level;
pub mod test_scene;

pub use level::Level;
