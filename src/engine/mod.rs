pub mod anim;
pub mod input;
pub mod time;
