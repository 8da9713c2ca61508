//! Tokenomics page

use dioxus::prelude::*;

/// One limited NFT ship collection
struct ShipSeries {
    name: &'static str,
    units: &'static str,
    accent: &'static str,
}

const SHIP_SERIES: [ShipSeries; 3] = [
    ShipSeries {
        name: "Aurora",
        units: "1,000",
        accent: "dot--blue",
    },
    ShipSeries {
        name: "Valkyria",
        units: "500",
        accent: "dot--purple",
    },
    ShipSeries {
        name: "Orion",
        units: "250",
        accent: "dot--green",
    },
];

/// Component NFT kinds and what each one changes
const COMPONENT_TYPES: [(&str, &str); 4] = [
    ("Engine", "Sets acceleration and top speed."),
    (
        "Driver",
        "Brings special skills, such as better grip in corners or lower $FUEL consumption.",
    ),
    ("Spoilers/Aerodynamics", "Affect handling and stability."),
    ("Armor", "Gives more resistance to damage."),
];

#[component]
pub fn TokenomicsRoute() -> Element {
    rsx! {
        section {
            class: "page tokenomics",
            header {
                class: "tokenomics-header",
                h1 { "Tokenomics and Ecosystem Design" }
                p { class: "tokenomics-subtitle", "Crypto Space Racing Game" }
            }

            article {
                class: "token-card",
                h2 { "Overview" }
                p {
                    "The proposal aims to build a solid, sustainable economic ecosystem for a space racing "
                    "game that combines blockchain technology, NFTs and a dual token economy. It introduces "
                    "a main token ($NEBULA) and a utility token ($FUEL), together with ship NFTs (ERC-1155) "
                    "and interchangeable components. The goal is to reward active player participation, the "
                    "upgrading and customization of their assets and constant competition, and to secure "
                    "sustained revenue and value growth for the development team."
                }
            }

            article {
                class: "token-card",
                h2 { "Ecosystem Elements" }

                h3 { "Ship NFTs (ERC-1155)" }
                div {
                    class: "token-block",
                    h4 { "Limited Series" }
                    p { "Each ship type is released in a limited series to drive rarity and value." }
                    ul {
                        class: "series-list",
                        for series in SHIP_SERIES.iter() {
                            li {
                                key: "{series.name}",
                                span { class: "dot {series.accent}" }
                                "{series.name} Collection: {series.units} units"
                            }
                        }
                    }
                }
                div {
                    class: "token-block",
                    h4 { "Component Slots" }
                    p {
                        "Every ship has dedicated slots for components (engine, driver, aerodynamics, "
                        "armor), which are individual NFTs as well. These components set the ship's stats "
                        "and its performance in races."
                    }
                }
                div {
                    class: "token-block",
                    h4 { "Functional and Aesthetic Depth" }
                    ul {
                        li {
                            "Ships and their components allow deep customization, making it easy to tune "
                            "stats for different kinds of tracks and play styles."
                        }
                        li {
                            "Each ship's look can change with the installed components, for a unique, "
                            "personal visual experience."
                        }
                    }
                }

                h3 { "Component NFTs and AI Fusion" }
                div {
                    class: "token-block",
                    h4 { "Component Types" }
                    ul {
                        for (name, effect) in COMPONENT_TYPES {
                            li { key: "{name}", strong { "{name} (NFT): " } "{effect}" }
                        }
                    }
                }
                div {
                    class: "token-block",
                    h4 { "Features" }
                    ul {
                        li {
                            strong { "Swapping between ships: " }
                            "Components can be removed from one ship and installed on another compatible one."
                        }
                        li {
                            strong { "Buying and selling: " }
                            "An active secondary market lets players trade their components, looking for "
                            "rarer or more valuable parts."
                        }
                    }
                }
            }
        }
    }
}
