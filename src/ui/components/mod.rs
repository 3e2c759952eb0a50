pub mod achievements;
pub mod dashboard;
pub mod lesson_card;
pub mod nav_header;
pub mod practice_area;
pub mod progress_bar;
pub mod steno_keyboard;
pub mod toast;
pub mod volume_card;
