pub mod redirect;
pub mod relay;

pub use redirect::redirect_page;
pub use relay::relay_webhook;
