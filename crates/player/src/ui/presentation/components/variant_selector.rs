//! Runtime variant picker shown before a session starts

use dioxus::prelude::*;
use turbo_racing_domain::RuntimeVariant;

/// Props for the VariantSelector component
#[derive(Props, Clone, PartialEq)]
pub struct VariantSelectorProps {
    pub selected: RuntimeVariant,
    /// False while a session is started
    pub enabled: bool,
    pub on_select: EventHandler<RuntimeVariant>,
}

#[component]
pub fn VariantSelector(props: VariantSelectorProps) -> Element {
    rsx! {
        div {
            class: "variant-selector",
            role: "radiogroup",
            for variant in RuntimeVariant::ALL {
                button {
                    key: "{variant}",
                    class: if variant == props.selected { "variant-option variant-option--selected" } else { "variant-option" },
                    role: "radio",
                    aria_checked: variant == props.selected,
                    disabled: !props.enabled,
                    onclick: move |_| props.on_select.call(variant),
                    h3 { "{variant.title()}" }
                    p { "{variant.description()}" }
                }
            }
        }
    }
}
