use api::FieldError;
use dioxus::prelude::*;

use super::{document, messages_for};
use crate::context::PageContext;
use crate::layout::{FieldMessages, Layout};

/// Echoed registration values. Passwords are never sent back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub errors: Vec<FieldError>,
}

pub fn render_signup(ctx: PageContext, form: SignupForm) -> String {
    document(VirtualDom::new_with_props(Signup, SignupProps { ctx, form }))
}

pub fn render_signin(ctx: PageContext, email: String) -> String {
    document(VirtualDom::new_with_props(Signin, SigninProps { ctx, email }))
}

#[component]
fn Signup(ctx: PageContext, form: SignupForm) -> Element {
    let name_errors = messages_for(&form.errors, "name");
    let email_errors = messages_for(&form.errors, "email");
    let password_errors = messages_for(&form.errors, "password");
    let confirm_errors = messages_for(&form.errors, "confirm_password");
    rsx! {
        Layout { ctx, title: "Registro",
            h1 { "Crear cuenta" }
            form { class: "card", action: "/users/signup", method: "POST",
                label { r#for: "name", "Nombre" }
                input { id: "name", r#type: "text", name: "name", value: "{form.name}", autofocus: true }
                FieldMessages { errors: name_errors }

                label { r#for: "email", "Correo electrónico" }
                input { id: "email", r#type: "email", name: "email", value: "{form.email}" }
                FieldMessages { errors: email_errors }

                label { r#for: "password", "Contraseña" }
                input { id: "password", r#type: "password", name: "password" }
                FieldMessages { errors: password_errors }

                label { r#for: "confirm_password", "Confirmar contraseña" }
                input { id: "confirm_password", r#type: "password", name: "confirm_password" }
                FieldMessages { errors: confirm_errors }

                button { class: "button", r#type: "submit", "Registrarse" }
            }
            p { "¿Ya tienes cuenta? " a { href: "/usuarios/ingreso", "Ingresa aquí" } }
        }
    }
}

#[component]
fn Signin(ctx: PageContext, email: String) -> Element {
    rsx! {
        Layout { ctx, title: "Ingreso",
            h1 { "Ingresar" }
            form { class: "card", action: "/users/signin", method: "POST",
                label { r#for: "email", "Correo electrónico" }
                input { id: "email", r#type: "email", name: "email", value: "{email}", autofocus: true }
                label { r#for: "password", "Contraseña" }
                input { id: "password", r#type: "password", name: "password" }
                button { class: "button", r#type: "submit", "Ingresar" }
            }
            p { "¿No tienes cuenta? " a { href: "/usuarios/registro", "Regístrate" } }
        }
    }
}
