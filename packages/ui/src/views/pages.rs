use dioxus::prelude::*;

use super::document;
use crate::context::PageContext;
use crate::layout::Layout;

pub const FAQ_CATEGORIES: [&str; 4] = ["General", "Cuenta", "Notas", "Soporte"];

pub fn render_home(ctx: PageContext) -> String {
    document(VirtualDom::new_with_props(Home, HomeProps { ctx }))
}

pub fn render_faq(ctx: PageContext) -> String {
    document(VirtualDom::new_with_props(Faq, FaqProps { ctx }))
}

pub fn render_privacy(ctx: PageContext) -> String {
    document(VirtualDom::new_with_props(Privacy, PrivacyProps { ctx }))
}

pub fn render_terms(ctx: PageContext) -> String {
    document(VirtualDom::new_with_props(Terms, TermsProps { ctx }))
}

#[component]
fn Home(ctx: PageContext) -> Element {
    let signed_in = ctx.user.is_some();
    rsx! {
        Layout { ctx, title: "Inicio",
            section { class: "hero",
                h1 { "Gestor de Notas" }
                p { "Guarda tus ideas, tareas y recordatorios en un solo lugar." }
                if signed_in {
                    a { class: "button", href: "/notas", "Ver mis notas" }
                } else {
                    a { class: "button", href: "/usuarios/registro", "Crear una cuenta" }
                    a { class: "button button-secondary", href: "/usuarios/ingreso", "Ingresar" }
                }
            }
        }
    }
}

#[component]
fn Faq(ctx: PageContext) -> Element {
    rsx! {
        Layout { ctx, title: "Preguntas frecuentes",
            h1 { "Preguntas frecuentes" }
            for category in FAQ_CATEGORIES {
                section { class: "faq-category",
                    h2 { "{category}" }
                    for (question, answer) in faq_entries(category) {
                        details {
                            summary { "{question}" }
                            p { "{answer}" }
                        }
                    }
                }
            }
        }
    }
}

fn faq_entries(category: &str) -> Vec<(&'static str, &'static str)> {
    match category {
        "General" => vec![(
            "¿Qué es Gestor de Notas?",
            "Una aplicación para crear, editar y organizar notas personales.",
        )],
        "Cuenta" => vec![
            (
                "¿Cómo creo una cuenta?",
                "Desde la página de registro, con tu nombre, correo y una contraseña de al menos 6 caracteres.",
            ),
            (
                "¿Cuánto dura mi sesión?",
                "La sesión se cierra tras 24 horas sin actividad o cuando eliges salir.",
            ),
        ],
        "Notas" => vec![(
            "¿Quién puede ver mis notas?",
            "Solo tú. Cada nota pertenece a la cuenta que la creó.",
        )],
        "Soporte" => vec![(
            "¿Cómo contacto al equipo?",
            "Usa el formulario de contacto y te responderemos a tu correo.",
        )],
        _ => Vec::new(),
    }
}

#[component]
fn Privacy(ctx: PageContext) -> Element {
    rsx! {
        Layout { ctx, title: "Política de privacidad",
            h1 { "Política de privacidad" }
            p { "Guardamos tu nombre, tu correo electrónico y las notas que creas. Las contraseñas se almacenan solo como hash." }
            p { "Los mensajes del formulario de contacto se conservan junto con la dirección IP de origen para prevenir abusos." }
            p { "No compartimos tus datos con terceros." }
        }
    }
}

#[component]
fn Terms(ctx: PageContext) -> Element {
    rsx! {
        Layout { ctx, title: "Términos de servicio",
            h1 { "Términos de servicio" }
            p { "El servicio se ofrece tal cual, sin garantías de disponibilidad." }
            p { "Eres responsable del contenido de tus notas y de mantener segura tu contraseña." }
        }
    }
}
