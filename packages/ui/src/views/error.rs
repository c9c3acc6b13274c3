use dioxus::prelude::*;

use super::document;
use crate::context::PageContext;
use crate::layout::Layout;

/// Error page for `status`. `message` must be safe to show to anyone.
pub fn render_error(ctx: PageContext, status: u16, message: String) -> String {
    document(VirtualDom::new_with_props(
        ErrorPage,
        ErrorPageProps {
            ctx,
            status,
            message,
        },
    ))
}

#[component]
fn ErrorPage(ctx: PageContext, status: u16, message: String) -> Element {
    rsx! {
        Layout { ctx, title: "Error {status}",
            section { class: "error-page",
                h1 { "{status}" }
                p { "{message}" }
                a { class: "button", href: "/", "Volver al inicio" }
            }
        }
    }
}
