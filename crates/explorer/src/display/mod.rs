pub mod boundary;
pub mod output;
pub mod view;

pub use boundary::{fallback_text, Guarded, ResultsBoundary, RetryHandle};
pub use view::{
  platform_icon, render_privacy_notice, render_recent, render_saved, ResultView, ViewOptions,
};
