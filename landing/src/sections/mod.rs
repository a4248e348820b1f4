// Page sections of the academy site

/// Brand name used across the page (single source of truth)
pub const BRAND: &str = "The Advanced Learning Academy";

mod contact_bar;
mod footer;
mod hero;
mod lecture_card;
mod lectures;
mod mobile_app;
mod nav;

pub use contact_bar::ContactBar;
pub use footer::Footer;
pub use hero::HeroSlider;
pub use lecture_card::LectureCard;
pub use lectures::SpecialLectures;
pub use mobile_app::MobileApp;
pub use nav::Nav;
