use dioxus::prelude::*;

use crate::context::{FlashKind, FlashMessage, PageContext};

/// Path the stylesheet is served from.
pub const STYLESHEET_PATH: &str = "/static/notas.css";

/// Page shell shared by every view.
#[component]
pub fn Layout(ctx: PageContext, title: String, children: Element) -> Element {
    let year = ctx.year;
    let version = ctx.version;
    rsx! {
        head {
            meta { charset: "utf-8" }
            meta { name: "viewport", content: "width=device-width, initial-scale=1" }
            title { "{title} | Gestor de Notas" }
            link { rel: "stylesheet", href: STYLESHEET_PATH }
        }
        body {
            Navbar { ctx: ctx.clone() }
            main { class: "container",
                FlashList { flashes: ctx.flashes.clone() }
                {children}
            }
            footer { class: "footer",
                p { "© {year} Gestor de Notas · v{version}" }
                nav {
                    a { href: "/privacidad", "Privacidad" }
                    a { href: "/terminos", "Términos" }
                }
            }
        }
    }
}

#[component]
pub fn Navbar(ctx: PageContext) -> Element {
    rsx! {
        header { class: "navbar",
            a { class: "brand", href: "/", "Gestor de Notas" }
            nav {
                if let Some(user) = ctx.user {
                    a { href: "/notas", "Notas" }
                    a { href: "/notas/agregar", "Nueva nota" }
                    a { href: "/faq", "FAQ" }
                    a { href: "/contacto", "Contacto" }
                    span { class: "user", "{user.name}" }
                    a { href: "/usuarios/salir", "Salir" }
                } else {
                    a { href: "/usuarios/ingreso", "Ingresar" }
                    a { href: "/usuarios/registro", "Registrarse" }
                }
            }
        }
    }
}

#[component]
fn FlashList(flashes: Vec<FlashMessage>) -> Element {
    rsx! {
        for flash in flashes {
            div { class: alert_class(flash.kind), "{flash.text}" }
        }
    }
}

fn alert_class(kind: FlashKind) -> &'static str {
    match kind {
        FlashKind::Success => "alert alert-success",
        FlashKind::Error => "alert alert-error",
    }
}

/// Inline messages for one form field.
#[component]
pub fn FieldMessages(errors: Vec<String>) -> Element {
    rsx! {
        for message in errors {
            small { class: "field-error", "{message}" }
        }
    }
}
