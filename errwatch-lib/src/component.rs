//! Component identity as seen by the framework error handler.

/// Identity reported for the root component.
pub const ROOT: &str = "root";

/// Identity reported for a component that carries no configuration.
pub const ANONYMOUS: &str = "anonymous";

/// What the capture library needs to know about a UI component instance.
///
/// Implemented by the adapter for whatever UI framework hosts the app.
pub trait ComponentInstance {
    /// Whether this instance is the application root.
    fn is_root(&self) -> bool;

    /// Whether the instance carries any component configuration at all.
    fn is_configured(&self) -> bool {
        true
    }

    /// Configured component name.
    fn display_name(&self) -> Option<&str>;

    /// Tag the component was registered under, used when it has no name.
    fn internal_tag(&self) -> Option<&str> {
        None
    }

    /// Source file the component was defined in.
    fn source_path(&self) -> Option<&str>;
}

/// Resolved name/path pair of a component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentIdentity {
    pub name: Option<String>,
    pub path: Option<String>,
}

impl ComponentIdentity {
    fn fixed(value: &str) -> Self {
        Self {
            name: Some(value.to_string()),
            path: Some(value.to_string()),
        }
    }

    /// Resolves the identity of a component instance.
    pub fn resolve(instance: &dyn ComponentInstance) -> Self {
        if instance.is_root() {
            return Self::fixed(ROOT);
        }
        if !instance.is_configured() {
            return Self::fixed(ANONYMOUS);
        }

        let name = instance
            .display_name()
            .filter(|n| !n.is_empty())
            .or_else(|| instance.internal_tag())
            .map(str::to_string);

        Self {
            name,
            path: instance.source_path().map(str::to_string),
        }
    }
}

/// Plain component description, usable directly as a [`ComponentInstance`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentInfo {
    pub root: bool,
    pub configured: bool,
    pub name: Option<String>,
    pub tag: Option<String>,
    pub file: Option<String>,
}

impl ComponentInfo {
    /// The application root.
    pub fn root() -> Self {
        Self {
            root: true,
            configured: true,
            ..Default::default()
        }
    }

    /// A component without configuration.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A named component.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            configured: true,
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.configured = true;
        self.tag = Some(tag.into());
        self
    }

    pub fn file(mut self, file: impl Into<String>) -> Self {
        self.configured = true;
        self.file = Some(file.into());
        self
    }
}

impl ComponentInstance for ComponentInfo {
    fn is_root(&self) -> bool {
        self.root
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    fn display_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn internal_tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    fn source_path(&self) -> Option<&str> {
        self.file.as_deref()
    }
}
