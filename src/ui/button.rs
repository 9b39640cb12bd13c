//! Server-rendered buttons.

use maud::{Markup, html};

const BASE_CLASSES: &str = "inline-flex items-center justify-center text-center rounded-lg focus:outline-none focus:ring-4";
const DISABLED_CLASSES: &str = "cursor-not-allowed opacity-50";

/// Style tokens injected by [`secondary_button`].
pub const SECONDARY_STYLES: &str =
    "font-medium hover:bg-gray-100 focus:ring-gray-100 border-2 border-gray-100 bg-white";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonType {
    #[default]
    Button,
    Submit,
    Reset,
}

impl ButtonType {
    fn as_str(&self) -> &'static str {
        match self {
            ButtonType::Button => "button",
            ButtonType::Submit => "submit",
            ButtonType::Reset => "reset",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonSize {
    Sm,
    Md,
    Lg,
}

impl ButtonSize {
    fn class(&self) -> &'static str {
        match self {
            ButtonSize::Sm => "px-3 py-2 text-sm",
            ButtonSize::Md => "px-5 py-2.5 text-sm",
            ButtonSize::Lg => "px-5 py-3 text-base",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ButtonProps {
    pub disabled: bool,
    pub kind: ButtonType,
    pub size: Option<ButtonSize>,
    pub href: Option<String>,
}

fn class_list(props: &ButtonProps, styles: &str) -> String {
    let mut classes = vec![BASE_CLASSES];
    if let Some(size) = props.size {
        classes.push(size.class());
    }
    if props.disabled {
        classes.push(DISABLED_CLASSES);
    }
    if !styles.is_empty() {
        classes.push(styles);
    }
    classes.join(" ")
}

/// Shared rendering for every button variant.
///
/// With `href` set this is a link; a disabled link drops its `href` so it
/// cannot be followed.
pub fn base_button(props: &ButtonProps, styles: &str, children: Markup) -> Markup {
    let class = class_list(props, styles);
    html! {
        @if let Some(href) = props.href.as_deref() {
            @if props.disabled {
                a class=(class) role="link" aria-disabled="true" { (children) }
            } @else {
                a class=(class) href=(href) { (children) }
            }
        } @else {
            button type=(props.kind.as_str()) class=(class) disabled[props.disabled] {
                (children)
            }
        }
    }
}

pub fn secondary_button(props: &ButtonProps, children: Markup) -> Markup {
    base_button(props, SECONDARY_STYLES, children)
}
