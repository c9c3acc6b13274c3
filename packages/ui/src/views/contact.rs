use dioxus::prelude::*;

use super::document;
use crate::context::PageContext;
use crate::layout::Layout;

pub fn render_contact(ctx: PageContext) -> String {
    document(VirtualDom::new_with_props(Contact, ContactProps { ctx }))
}

#[component]
fn Contact(ctx: PageContext) -> Element {
    let (name, email) = ctx
        .user
        .as_ref()
        .map(|u| (u.name.clone(), u.email.clone()))
        .unwrap_or_default();
    rsx! {
        Layout { ctx, title: "Contacto",
            h1 { "Contacto" }
            form { class: "card", action: "/contacto", method: "POST",
                label { r#for: "name", "Nombre" }
                input { id: "name", r#type: "text", name: "name", value: "{name}" }
                label { r#for: "email", "Correo electrónico" }
                input { id: "email", r#type: "email", name: "email", value: "{email}" }
                label { r#for: "subject", "Asunto" }
                input { id: "subject", r#type: "text", name: "subject" }
                label { r#for: "message", "Mensaje" }
                textarea { id: "message", name: "message", rows: "6" }
                button { class: "button", r#type: "submit", "Enviar" }
            }
        }
    }
}
