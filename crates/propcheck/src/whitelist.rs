//! Built-in whitelist of framework and platform reserved prop names.
//!
//! Props matching the whitelist are never reported as undeclared, even when
//! a component's schema does not mention them. The registry is partitioned
//! into categories so callers can compose their own whitelist:
//!
//! ```
//! use propcheck::{PatternSet, Whitelist, WhitelistCategory};
//!
//! let mut whitelist = Whitelist::builtin().all().clone();
//! whitelist.extend_from(&PatternSet::normalize(["/^x-/"]));
//! assert!(whitelist.matches("x-trace-id"));
//! assert!(Whitelist::builtin()
//!     .category(WhitelistCategory::AriaAttributes)
//!     .matches("aria-expanded"));
//! ```

use crate::pattern::{PatternSet, PatternSpec};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Named group of whitelisted prop patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WhitelistCategory {
    /// Props consumed by the framework itself (`key`, `ref`, `children`)
    FrameworkInternal,
    /// `data-*` attributes
    DataAttributes,
    /// `aria-*` attributes
    AriaAttributes,
    /// `onXxx` event handler props
    EventHandlers,
    /// Standard markup attributes (`id`, `className`, `href`, ...)
    MarkupAttributes,
    /// Vector graphics presentation attributes (`viewBox`, `fill`, ...)
    GraphicsAttributes,
    /// Union of every other category
    All,
}

impl WhitelistCategory {
    /// Every concrete category, in the order they are concatenated into `All`
    pub const BUILT_IN: [Self; 6] = [
        Self::FrameworkInternal,
        Self::DataAttributes,
        Self::AriaAttributes,
        Self::EventHandlers,
        Self::MarkupAttributes,
        Self::GraphicsAttributes,
    ];

    /// Kebab-case category name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FrameworkInternal => "framework-internal",
            Self::DataAttributes => "data-attributes",
            Self::AriaAttributes => "aria-attributes",
            Self::EventHandlers => "event-handlers",
            Self::MarkupAttributes => "markup-attributes",
            Self::GraphicsAttributes => "graphics-attributes",
            Self::All => "all",
        }
    }

    /// Pattern sources for a concrete category. Empty for `All`.
    const fn sources(self) -> &'static [&'static str] {
        match self {
            Self::FrameworkInternal => FRAMEWORK_INTERNAL,
            Self::DataAttributes => &["/^data-/"],
            Self::AriaAttributes => &["/^aria-/"],
            Self::EventHandlers => &["/^on[A-Z]/"],
            Self::MarkupAttributes => MARKUP_ATTRIBUTES,
            Self::GraphicsAttributes => GRAPHICS_ATTRIBUTES,
            Self::All => &[],
        }
    }

    /// Pattern specs for this category; `All` yields every category's specs
    #[must_use]
    pub fn specs(self) -> Vec<PatternSpec> {
        match self {
            Self::All => Self::BUILT_IN
                .iter()
                .flat_map(|category| category.specs())
                .collect(),
            _ => self
                .sources()
                .iter()
                .map(|source| PatternSpec::parse(source))
                .collect(),
        }
    }
}

impl fmt::Display for WhitelistCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WhitelistCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::BUILT_IN
            .into_iter()
            .chain([Self::All])
            .find(|category| category.name() == s)
            .ok_or_else(|| format!("unknown whitelist category: {s}"))
    }
}

const FRAMEWORK_INTERNAL: &[&str] = &[
    "key",
    "ref",
    "children",
    "dangerouslySetInnerHTML",
    "suppressContentEditableWarning",
    "suppressHydrationWarning",
    "defaultValue",
    "defaultChecked",
];

const MARKUP_ATTRIBUTES: &[&str] = &[
    "accept",
    "acceptCharset",
    "accessKey",
    "action",
    "allowFullScreen",
    "alt",
    "async",
    "autoComplete",
    "autoFocus",
    "autoPlay",
    "capture",
    "cellPadding",
    "cellSpacing",
    "charSet",
    "checked",
    "cite",
    "className",
    "colSpan",
    "cols",
    "content",
    "contentEditable",
    "contextMenu",
    "controls",
    "coords",
    "crossOrigin",
    "dateTime",
    "default",
    "defer",
    "dir",
    "disabled",
    "download",
    "draggable",
    "encType",
    "form",
    "formAction",
    "formEncType",
    "formMethod",
    "formNoValidate",
    "formTarget",
    "headers",
    "height",
    "hidden",
    "high",
    "href",
    "hrefLang",
    "htmlFor",
    "httpEquiv",
    "id",
    "inputMode",
    "integrity",
    "is",
    "kind",
    "label",
    "lang",
    "list",
    "loop",
    "low",
    "max",
    "maxLength",
    "media",
    "method",
    "min",
    "minLength",
    "multiple",
    "muted",
    "name",
    "noValidate",
    "nonce",
    "open",
    "optimum",
    "pattern",
    "placeholder",
    "poster",
    "preload",
    "readOnly",
    "rel",
    "required",
    "reversed",
    "role",
    "rowSpan",
    "rows",
    "sandbox",
    "scope",
    "selected",
    "shape",
    "size",
    "sizes",
    "span",
    "spellCheck",
    "src",
    "srcDoc",
    "srcLang",
    "srcSet",
    "start",
    "step",
    "style",
    "summary",
    "tabIndex",
    "target",
    "title",
    "type",
    "useMap",
    "value",
    "width",
    "wrap",
];

const GRAPHICS_ATTRIBUTES: &[&str] = &[
    "clipPath",
    "cx",
    "cy",
    "d",
    "dx",
    "dy",
    "fill",
    "fillOpacity",
    "fillRule",
    "fontFamily",
    "fontSize",
    "fx",
    "fy",
    "gradientTransform",
    "gradientUnits",
    "markerEnd",
    "markerMid",
    "markerStart",
    "mask",
    "offset",
    "opacity",
    "patternContentUnits",
    "patternUnits",
    "points",
    "preserveAspectRatio",
    "r",
    "rx",
    "ry",
    "spreadMethod",
    "stopColor",
    "stopOpacity",
    "stroke",
    "strokeDasharray",
    "strokeLinecap",
    "strokeLinejoin",
    "strokeOpacity",
    "strokeWidth",
    "textAnchor",
    "transform",
    "version",
    "viewBox",
    "x",
    "x1",
    "x2",
    "xmlns",
    "xmlnsXlink",
    "xlinkHref",
    "y",
    "y1",
    "y2",
];

static BUILTIN: Lazy<Whitelist> = Lazy::new(Whitelist::load);

/// Compiled whitelist categories plus their derived union
#[derive(Debug, Clone)]
pub struct Whitelist {
    categories: HashMap<WhitelistCategory, PatternSet>,
    all: PatternSet,
}

impl Whitelist {
    /// The built-in registry, compiled on first use
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    fn load() -> Self {
        let categories: HashMap<_, _> = WhitelistCategory::BUILT_IN
            .into_iter()
            .map(|category| (category, PatternSet::normalize(category.specs())))
            .collect();

        let mut all = PatternSet::new();
        for category in WhitelistCategory::BUILT_IN {
            if let Some(set) = categories.get(&category) {
                all.extend_from(set);
            }
        }

        tracing::debug!(patterns = all.len(), "loaded built-in whitelist");
        Self { categories, all }
    }

    /// Patterns for one category
    #[must_use]
    pub fn category(&self, category: WhitelistCategory) -> &PatternSet {
        match category {
            WhitelistCategory::All => &self.all,
            _ => &self.categories[&category],
        }
    }

    /// Union of all categories
    #[must_use]
    pub fn all(&self) -> &PatternSet {
        &self.all
    }
}
