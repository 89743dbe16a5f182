//! The incremental definition builder.
//!
//! Declarations are made against an implicit cursor: fields go into the open
//! group, layouts attach to the most recent field, and sub-fields attach to
//! the most recent layout of that field (or the field itself). A group stays
//! open until the next group starts or the session is finished.

use fieldsmith_core::{Map, sanitize_label, sanitize_name};
use tracing::debug;

use crate::{
    BuildError, Children, Display, Field, FieldDecl, FieldGroup, GroupDecl, Host, KeyGenerator,
    KeyKind, LOCAL_FIELD_GROUPS, Layout, LayoutDecl, Registry, Result,
    catalog::{self, Nesting},
};

/// Option keys that can never override a group's identity.
const GROUP_PROTECTED: &[&str] = &["key", "title", "fields", "location"];

/// Option keys that can never override a field's identity or children.
const FIELD_PROTECTED: &[&str] = &["key", "label", "name", "type", "sub_fields", "layouts"];

/// Option keys that can never override a layout's identity or children.
const LAYOUT_PROTECTED: &[&str] = &["key", "name", "label", "display", "sub_fields"];

/// Observable state of a build session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No group has been declared yet.
    Empty,
    /// A group is accepting fields.
    Open,
    /// Every declared group has been finalized.
    Flushed,
    /// A declaration failed; the session accepts nothing further.
    Failed,
}

#[derive(Debug)]
enum Session {
    Empty,
    Open(Box<OpenGroup>),
    Flushed,
    Failed(BuildError),
}

/// Where the next layout or sub-field lands.
#[derive(Debug)]
struct Cursor {
    /// Index of the current field in the open group.
    field: usize,
    field_raw_key: String,
    layout: Option<LayoutCursor>,
}

#[derive(Debug)]
struct LayoutCursor {
    /// Index of the current layout in the current field.
    index: usize,
    raw_key: String,
}

/// A group that is still accepting declarations.
#[derive(Debug)]
struct OpenGroup {
    group: FieldGroup,
    raw_key: String,
    cursor: Option<Cursor>,
}

impl OpenGroup {
    fn push_field(&mut self, keys: &mut KeyGenerator, decl: FieldDecl) -> Result<()> {
        let group_raw_key = &self.raw_key;
        let (key, raw_key) = keys.assign(KeyKind::Field, decl.key.as_deref(), || {
            KeyGenerator::field_raw_key(group_raw_key, &decl.name)
        })?;

        self.group.fields.push(build_field(key, decl));
        self.cursor = Some(Cursor {
            field: self.group.fields.len() - 1,
            field_raw_key: raw_key,
            layout: None,
        });
        Ok(())
    }

    /// Returns `false` when the current field cannot hold layouts.
    fn attach_layout(&mut self, keys: &mut KeyGenerator, decl: LayoutDecl) -> Result<bool> {
        let Some(cursor) = self.cursor.as_mut() else {
            return Ok(false);
        };
        let Children::Layouts(layouts) = &mut self.group.fields[cursor.field].children else {
            return Ok(false);
        };

        let field_raw_key = &cursor.field_raw_key;
        let (key, raw_key) = keys.assign(KeyKind::Layout, decl.key.as_deref(), || {
            KeyGenerator::child_raw_key(field_raw_key, &decl.name)
        })?;

        let mut settings = catalog::layout_defaults();
        merge_options(&mut settings, decl.options, LAYOUT_PROTECTED);
        layouts.push(Layout {
            key,
            name: sanitize_name(&decl.name),
            label: decl.label,
            display: Display::normalize(decl.display.as_deref()),
            settings,
            sub_fields: Vec::new(),
        });
        cursor.layout = Some(LayoutCursor {
            index: layouts.len() - 1,
            raw_key,
        });
        Ok(true)
    }

    /// Returns `false` when neither the current layout nor field can hold sub-fields.
    fn attach_sub_field(&mut self, keys: &mut KeyGenerator, decl: FieldDecl) -> Result<bool> {
        let Some(cursor) = self.cursor.as_ref() else {
            return Ok(false);
        };
        let (sub_fields, parent_raw_key) = match &mut self.group.fields[cursor.field].children {
            Children::Layouts(layouts) => match &cursor.layout {
                Some(layout) => (&mut layouts[layout.index].sub_fields, &layout.raw_key),
                None => return Ok(false),
            },
            Children::SubFields(sub_fields) => (sub_fields, &cursor.field_raw_key),
            Children::None => return Ok(false),
        };

        let (key, _) = keys.assign(KeyKind::Field, decl.key.as_deref(), || {
            KeyGenerator::child_raw_key(parent_raw_key, &decl.name)
        })?;
        sub_fields.push(build_field(key, decl));
        Ok(true)
    }
}

/// Accumulates field-group declarations for one build session.
///
/// The first failed declaration ends the session. Every later call, including
/// [`finish`](Self::finish), returns that same error, so a session with a
/// key collision can never be exported.
///
/// # Example
///
/// ```
/// use fieldsmith_builder::{DefinitionBuilder, FieldDecl, GroupDecl, StaticHost};
///
/// let mut builder = DefinitionBuilder::new(&StaticHost::acf_pro())?;
/// builder
///     .add_field_group(GroupDecl::new("Hero Banner").location(["post_type", "==", "page"]))?
///     .add_field(FieldDecl::new("text", "Heading"))?;
///
/// let groups = builder.finish()?;
/// assert_eq!(groups[0].title, "Hero Banner");
/// assert_eq!(groups[0].fields[0].name, "heading");
/// # Ok::<(), fieldsmith_builder::BuildError>(())
/// ```
#[derive(Debug)]
pub struct DefinitionBuilder {
    keys: KeyGenerator,
    session: Session,
    finished: Vec<FieldGroup>,
}

impl DefinitionBuilder {
    /// Start a session against `host`.
    ///
    /// Fails if the host cannot accept local field groups.
    pub fn new(host: &dyn Host) -> Result<Self> {
        Self::with_keys(host, KeyGenerator::new())
    }

    /// Start a session with a specific key generator.
    pub fn with_keys(host: &dyn Host, keys: KeyGenerator) -> Result<Self> {
        if !host.provides(LOCAL_FIELD_GROUPS) {
            return Err(BuildError::Precondition {
                capability: LOCAL_FIELD_GROUPS.to_string(),
            });
        }
        Ok(Self {
            keys,
            session: Session::Empty,
            finished: Vec::new(),
        })
    }

    /// Where the session is in its lifecycle.
    pub fn state(&self) -> SessionState {
        match self.session {
            Session::Empty => SessionState::Empty,
            Session::Open(_) => SessionState::Open,
            Session::Flushed => SessionState::Flushed,
            Session::Failed(_) => SessionState::Failed,
        }
    }

    /// The error that ended the session, if any.
    pub fn error(&self) -> Option<&BuildError> {
        match &self.session {
            Session::Failed(err) => Some(err),
            _ => None,
        }
    }

    fn ensure_live(&self) -> Result<()> {
        match self.error() {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    /// Record a failed declaration as the end of the session.
    fn settle<T>(&mut self, result: Result<T>) -> Result<T> {
        result.map_err(|err| {
            self.session = Session::Failed(err.clone());
            err
        })
    }

    /// Finalize the open group (if any) and open a new one.
    pub fn add_field_group(&mut self, decl: GroupDecl) -> Result<&mut Self> {
        self.ensure_live()?;
        self.flush_pending();

        let assigned = self.keys.assign(KeyKind::Group, decl.key.as_deref(), || {
            KeyGenerator::group_raw_key(&decl.name)
        });
        let (key, raw_key) = self.settle(assigned)?;

        let mut settings = catalog::group_defaults();
        merge_options(&mut settings, decl.options, GROUP_PROTECTED);

        let group = FieldGroup {
            key,
            title: sanitize_label(&decl.name),
            fields: Vec::new(),
            location: decl.locations.into_groups(),
            settings,
        };
        self.session = Session::Open(Box::new(OpenGroup {
            group,
            raw_key,
            cursor: None,
        }));
        Ok(self)
    }

    /// Append a field to the open group and make it the current field.
    pub fn add_field(&mut self, decl: FieldDecl) -> Result<&mut Self> {
        self.ensure_live()?;
        let pushed = match &mut self.session {
            Session::Open(open) => open.push_field(&mut self.keys, decl),
            _ => Err(BuildError::NoOpenGroup { name: decl.name }),
        };
        self.settle(pushed)?;
        Ok(self)
    }

    /// Attach a layout to the current field.
    ///
    /// Dropped silently when the current field cannot hold layouts.
    pub fn add_layout(&mut self, decl: LayoutDecl) -> Result<&mut Self> {
        self.ensure_live()?;
        let name = decl.name.clone();
        let attached = match &mut self.session {
            Session::Open(open) => open.attach_layout(&mut self.keys, decl),
            _ => Ok(false),
        };
        let attached = self.settle(attached)?;
        if !attached {
            debug!(layout = %name, "dropping layout: current field does not take layouts");
        }
        Ok(self)
    }

    /// Attach a sub-field to the current layout, or else the current field.
    ///
    /// Dropped silently when the target cannot hold sub-fields.
    pub fn add_sub_field(&mut self, decl: FieldDecl) -> Result<&mut Self> {
        self.ensure_live()?;
        let name = decl.name.clone();
        let attached = match &mut self.session {
            Session::Open(open) => open.attach_sub_field(&mut self.keys, decl),
            _ => Ok(false),
        };
        let attached = self.settle(attached)?;
        if !attached {
            debug!(sub_field = %name, "dropping sub-field: current target does not take sub-fields");
        }
        Ok(self)
    }

    /// Move the open group, with its fields, into the finished groups.
    ///
    /// Returns `false` if no group was open or the session has failed.
    pub fn flush_pending(&mut self) -> bool {
        match std::mem::replace(&mut self.session, Session::Flushed) {
            Session::Open(open) => {
                debug!(
                    group = %open.group.title,
                    fields = open.group.fields.len(),
                    "field group finalized"
                );
                self.finished.push(open.group);
                true
            }
            previous => {
                self.session = previous;
                false
            }
        }
    }

    /// Groups finalized so far, in declaration order.
    pub fn groups(&self) -> &[FieldGroup] {
        &self.finished
    }

    /// Finalize the open group and return every group in declaration order.
    ///
    /// Fails with the session's error if any declaration failed.
    pub fn finish(&mut self) -> Result<&[FieldGroup]> {
        self.ensure_live()?;
        self.flush_pending();
        Ok(&self.finished)
    }

    /// Finalize and take ownership of every group.
    pub fn into_groups(mut self) -> Result<Vec<FieldGroup>> {
        self.finish()?;
        Ok(self.finished)
    }

    /// Finalize and hand every group to `registry`, one call per group.
    ///
    /// Returns how many groups were registered. Nothing is registered when
    /// the session has failed.
    pub fn register_with(&mut self, registry: &mut dyn Registry) -> Result<usize> {
        for group in self.finish()? {
            registry.register(group.to_value());
        }
        Ok(self.finished.len())
    }

    /// Fields held by the session so far, open group included.
    ///
    /// Dropped layouts and sub-fields are not counted.
    pub fn field_count(&self) -> usize {
        let open = match &self.session {
            Session::Open(open) => open.group.field_count(),
            _ => 0,
        };
        self.finished.iter().map(FieldGroup::field_count).sum::<usize>() + open
    }

    /// Number of identifiers issued in this session.
    pub fn issued_keys(&self) -> usize {
        self.keys.issued()
    }
}

fn build_field(key: crate::Identifier, decl: FieldDecl) -> Field {
    let field_type = sanitize_name(&decl.field_type);
    let mut settings = catalog::field_defaults(&field_type);
    merge_options(&mut settings, decl.options, FIELD_PROTECTED);

    let children = match catalog::nesting(&field_type) {
        Nesting::None => Children::None,
        Nesting::SubFields => Children::SubFields(Vec::new()),
        Nesting::Layouts => Children::Layouts(Vec::new()),
    };

    Field {
        key,
        label: sanitize_label(&decl.name),
        name: sanitize_name(&decl.name),
        field_type,
        settings,
        children,
    }
}

/// Overlay `options` onto `defaults`.
///
/// Protected keys are discarded first. Remaining keys replace existing
/// defaults; keys without a default are ignored.
fn merge_options(defaults: &mut Map, options: Map, protected: &[&str]) {
    for (key, value) in options {
        if protected.contains(&key.as_str()) {
            continue;
        }
        if let Some(slot) = defaults.get_mut(&key) {
            *slot = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use fieldsmith_core::Value;

    use super::*;
    use crate::{LocationRule, StaticHost};

    fn builder() -> DefinitionBuilder {
        DefinitionBuilder::new(&StaticHost::acf_pro()).unwrap()
    }

    #[test]
    fn test_missing_capability_fails_at_construction() {
        let err = DefinitionBuilder::new(&StaticHost::new()).unwrap_err();
        assert!(matches!(
            err,
            BuildError::Precondition { ref capability } if capability == LOCAL_FIELD_GROUPS
        ));
    }

    #[test]
    fn test_state_machine() {
        let mut b = builder();
        assert_eq!(b.state(), SessionState::Empty);
        assert!(!b.flush_pending());
        assert_eq!(b.state(), SessionState::Empty);

        b.add_field_group(GroupDecl::new("Hero")).unwrap();
        assert_eq!(b.state(), SessionState::Open);
        assert!(b.groups().is_empty());

        assert!(b.flush_pending());
        assert_eq!(b.state(), SessionState::Flushed);
        assert_eq!(b.groups().len(), 1);

        assert!(!b.flush_pending());
        assert_eq!(b.groups().len(), 1);
    }

    #[test]
    fn test_new_group_flushes_previous() {
        let mut b = builder();
        b.add_field_group(GroupDecl::new("First"))
            .unwrap()
            .add_field(FieldDecl::new("text", "One"))
            .unwrap()
            .add_field_group(GroupDecl::new("Second"))
            .unwrap()
            .add_field(FieldDecl::new("text", "Two"))
            .unwrap();

        assert_eq!(b.groups().len(), 1);
        let groups = b.finish().unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].fields.len(), 1);
        assert_eq!(groups[0].fields[0].name, "one");
        assert_eq!(groups[1].fields.len(), 1);
        assert_eq!(groups[1].fields[0].name, "two");
    }

    #[test]
    fn test_field_identity_from_name() {
        let mut b = builder();
        b.add_field_group(GroupDecl::new("Hero Banner"))
            .unwrap()
            .add_field(FieldDecl::new("True False", "show-call_to action"))
            .unwrap();

        let field = &b.finish().unwrap()[0].fields[0];
        assert_eq!(field.label, "Show Call To Action");
        assert_eq!(field.name, "show_call_to_action");
        assert_eq!(field.field_type, "true_false");
    }

    #[test]
    fn test_protected_options_never_override_identity() {
        let mut b = builder();
        b.add_field_group(GroupDecl::new("Hero"))
            .unwrap()
            .add_field(
                FieldDecl::new("text", "Heading")
                    .option("name", "hijacked")
                    .option("label", "Hijacked")
                    .option("type", "image")
                    .option("key", "field_hijacked")
                    .option("placeholder", "Say something"),
            )
            .unwrap();

        let value = b.finish().unwrap()[0].fields[0].to_value();
        assert_eq!(value.get("name"), Some(&Value::string("heading")));
        assert_eq!(value.get("label"), Some(&Value::string("Heading")));
        assert_eq!(value.get("type"), Some(&Value::string("text")));
        assert_ne!(value.get("key"), Some(&Value::string("field_hijacked")));
        assert_eq!(value.get("placeholder"), Some(&Value::string("Say something")));
    }

    #[test]
    fn test_unknown_options_are_ignored() {
        let mut b = builder();
        b.add_field_group(GroupDecl::new("Hero").option("colour", "red"))
            .unwrap()
            .add_field(FieldDecl::new("text", "Heading").option("not_a_setting", true))
            .unwrap();

        let group = b.finish().unwrap()[0].to_value();
        assert!(group.get("colour").is_none());
        assert!(group.get("fields").unwrap().as_list().unwrap()[0]
            .get("not_a_setting")
            .is_none());
    }

    #[test]
    fn test_group_options_override_defaults() {
        let mut b = builder();
        b.add_field_group(
            GroupDecl::new("Hero")
                .option("position", "side")
                .option("menu_order", 3i64)
                .option("title", "Hijacked")
                .option("location", Value::list()),
        )
        .unwrap();

        let group = &b.finish().unwrap()[0];
        assert_eq!(group.title, "Hero");
        assert_eq!(group.settings.get("position"), Some(&Value::string("side")));
        assert_eq!(group.settings.get("menu_order"), Some(&Value::Int(3)));
        assert!(!group.settings.contains_key("location"));
    }

    #[test]
    fn test_shorthand_location() {
        let mut b = builder();
        b.add_field_group(GroupDecl::new("Hero").location(["post_type", "==", "page"]))
            .unwrap();

        assert_eq!(
            b.finish().unwrap()[0].location,
            vec![vec![LocationRule::new("post_type", "==", "page")]]
        );
    }

    #[test]
    fn test_field_without_group_is_an_error() {
        let err = builder()
            .add_field(FieldDecl::new("text", "Orphan"))
            .map(|_| ())
            .unwrap_err();
        assert!(matches!(err, BuildError::NoOpenGroup { ref name } if name == "Orphan"));
    }

    #[test]
    fn test_sub_field_nests_under_repeater() {
        let mut b = builder();
        b.add_field_group(GroupDecl::new("Hero"))
            .unwrap()
            .add_field(FieldDecl::new("repeater", "Items"))
            .unwrap()
            .add_sub_field(FieldDecl::new("text", "Label"))
            .unwrap();

        let group = &b.finish().unwrap()[0];
        assert_eq!(group.fields.len(), 1);
        let items = &group.fields[0];
        assert_eq!(items.sub_fields().len(), 1);
        assert_eq!(items.sub_fields()[0].name, "label");
    }

    #[test]
    fn test_layout_on_text_field_is_dropped() {
        let mut b = builder();
        b.add_field_group(GroupDecl::new("Hero"))
            .unwrap()
            .add_field(FieldDecl::new("text", "Title"))
            .unwrap()
            .add_layout(LayoutDecl::new("intro", "Intro"))
            .unwrap();

        let field = &b.finish().unwrap()[0].fields[0];
        assert!(field.layouts().is_empty());
        assert!(field.to_value().get("layouts").is_none());
        assert_eq!(b.issued_keys(), 2);
    }

    #[test]
    fn test_sub_field_on_text_field_is_dropped() {
        let mut b = builder();
        b.add_field_group(GroupDecl::new("Hero"))
            .unwrap()
            .add_field(FieldDecl::new("text", "Title"))
            .unwrap()
            .add_sub_field(FieldDecl::new("text", "Nested"))
            .unwrap();

        let group = &b.finish().unwrap()[0];
        assert_eq!(group.fields.len(), 1);
        assert!(group.fields[0].to_value().get("sub_fields").is_none());
    }

    #[test]
    fn test_field_count_skips_dropped_children() {
        let mut b = builder();
        b.add_field_group(GroupDecl::new("Hero"))
            .unwrap()
            .add_field(FieldDecl::new("text", "Title"))
            .unwrap()
            .add_sub_field(FieldDecl::new("text", "Nested"))
            .unwrap()
            .add_field_group(GroupDecl::new("Footer"))
            .unwrap()
            .add_field(FieldDecl::new("repeater", "Links"))
            .unwrap()
            .add_sub_field(FieldDecl::new("link", "Link"))
            .unwrap();

        // The second group is still open.
        assert_eq!(b.groups().len(), 1);
        assert_eq!(b.field_count(), 3);
    }

    #[test]
    fn test_attachments_without_a_field_are_dropped() {
        let mut b = builder();
        b.add_layout(LayoutDecl::new("intro", "Intro"))
            .unwrap()
            .add_sub_field(FieldDecl::new("text", "Nested"))
            .unwrap();
        assert_eq!(b.state(), SessionState::Empty);

        b.add_field_group(GroupDecl::new("Hero"))
            .unwrap()
            .add_sub_field(FieldDecl::new("text", "Nested"))
            .unwrap();
        assert!(b.finish().unwrap()[0].fields.is_empty());
    }

    #[test]
    fn test_sub_field_on_flexible_content_without_layout_is_dropped() {
        let mut b = builder();
        b.add_field_group(GroupDecl::new("Page"))
            .unwrap()
            .add_field(FieldDecl::new("flexible_content", "Sections"))
            .unwrap()
            .add_sub_field(FieldDecl::new("text", "Heading"))
            .unwrap();

        let sections = &b.finish().unwrap()[0].fields[0];
        assert!(sections.layouts().is_empty());
        assert!(sections.sub_fields().is_empty());
    }

    #[test]
    fn test_sub_fields_follow_the_latest_layout() {
        let mut b = builder();
        b.add_field_group(GroupDecl::new("Page"))
            .unwrap()
            .add_field(FieldDecl::new("flexible_content", "Sections"))
            .unwrap()
            .add_layout(LayoutDecl::new("intro", "Intro").display("row"))
            .unwrap()
            .add_sub_field(FieldDecl::new("text", "Heading"))
            .unwrap()
            .add_layout(LayoutDecl::new("gallery", "Gallery").display("grid"))
            .unwrap()
            .add_sub_field(FieldDecl::new("image", "Photo"))
            .unwrap()
            .add_sub_field(FieldDecl::new("text", "Caption"))
            .unwrap();

        let layouts = b.finish().unwrap()[0].fields[0].layouts().to_vec();
        assert_eq!(layouts.len(), 2);
        assert_eq!(layouts[0].display, Display::Row);
        assert_eq!(layouts[0].sub_fields.len(), 1);
        assert_eq!(layouts[1].display, Display::Block);
        assert_eq!(layouts[1].sub_fields.len(), 2);
        assert_eq!(layouts[1].sub_fields[1].name, "caption");
    }

    #[test]
    fn test_new_field_resets_layout_cursor() {
        let mut b = builder();
        b.add_field_group(GroupDecl::new("Page"))
            .unwrap()
            .add_field(FieldDecl::new("flexible_content", "Sections"))
            .unwrap()
            .add_layout(LayoutDecl::new("intro", "Intro"))
            .unwrap()
            .add_field(FieldDecl::new("repeater", "Links"))
            .unwrap()
            .add_sub_field(FieldDecl::new("link", "Link"))
            .unwrap();

        let fields = &b.finish().unwrap()[0].fields;
        assert!(fields[0].layouts()[0].sub_fields.is_empty());
        assert_eq!(fields[1].sub_fields().len(), 1);
    }

    #[test]
    fn test_keys_derive_from_hierarchy() {
        let mut b = builder();
        b.add_field_group(GroupDecl::new("Page"))
            .unwrap()
            .add_field(FieldDecl::new("flexible_content", "Sections"))
            .unwrap()
            .add_layout(LayoutDecl::new("intro", "Intro"))
            .unwrap()
            .add_sub_field(FieldDecl::new("text", "Heading"))
            .unwrap();

        let keys = KeyGenerator::new();
        let group = &b.finish().unwrap()[0];
        let sections = &group.fields[0];
        let intro = &sections.layouts()[0];

        assert_eq!(group.key.as_str(), format!("group_{}", keys.hash("page")));
        assert_eq!(
            sections.key.as_str(),
            format!("field_{}", keys.hash("page__sections"))
        );
        assert_eq!(
            intro.key.as_str(),
            format!("layout_{}", keys.hash("page__sections__intro"))
        );
        assert_eq!(
            intro.sub_fields[0].key.as_str(),
            format!("field_{}", keys.hash("page__sections__intro__heading"))
        );
    }

    #[test]
    fn test_explicit_group_key_feeds_field_keys() {
        let mut b = builder();
        b.add_field_group(GroupDecl::new("Hero Banner").key("group_hero"))
            .unwrap()
            .add_field(FieldDecl::new("text", "Heading"))
            .unwrap()
            .add_field(FieldDecl::new("text", "Subheading").key("subheading"))
            .unwrap();

        let keys = KeyGenerator::new();
        let group = &b.finish().unwrap()[0];
        assert_eq!(group.key.as_str(), "group_hero");
        assert_eq!(
            group.fields[0].key.as_str(),
            format!("field_{}", keys.hash("hero__heading"))
        );
        assert_eq!(group.fields[1].key.as_str(), "field_subheading");
    }

    #[test]
    fn test_duplicate_field_names_are_fatal() {
        let mut b = builder();
        b.add_field_group(GroupDecl::new("Hero"))
            .unwrap()
            .add_field(FieldDecl::new("text", "Title"))
            .unwrap();

        let err = b
            .add_field(FieldDecl::new("textarea", "title"))
            .map(|_| ())
            .unwrap_err();
        assert!(matches!(err, BuildError::DuplicateIdentifier { .. }));
    }

    #[test]
    fn test_duplicate_group_names_are_fatal() {
        let mut b = builder();
        b.add_field_group(GroupDecl::new("Hero")).unwrap();
        assert!(b.add_field_group(GroupDecl::new("hero")).is_err());
    }

    #[test]
    fn test_ignored_duplicate_still_fails_the_session() {
        let mut b = builder();
        b.add_field_group(GroupDecl::new("Hero"))
            .unwrap()
            .add_field(FieldDecl::new("text", "Title"))
            .unwrap();
        let _ = b.add_field(FieldDecl::new("textarea", "title"));

        assert_eq!(b.state(), SessionState::Failed);
        assert!(matches!(
            b.error(),
            Some(BuildError::DuplicateIdentifier { raw_key, .. }) if raw_key == "hero__title"
        ));
        assert!(!b.flush_pending());
        assert!(matches!(
            b.finish(),
            Err(BuildError::DuplicateIdentifier { .. })
        ));
        assert!(b.groups().is_empty());
    }

    #[test]
    fn test_failed_session_rejects_further_declarations() {
        let mut b = builder();
        let _ = b.add_field(FieldDecl::new("text", "Orphan"));

        assert!(matches!(
            b.add_field_group(GroupDecl::new("Hero")),
            Err(BuildError::NoOpenGroup { .. })
        ));
        assert!(b.add_layout(LayoutDecl::new("intro", "Intro")).is_err());
        assert!(b.add_sub_field(FieldDecl::new("text", "Label")).is_err());

        let mut registered: Vec<Value> = Vec::new();
        assert!(b.register_with(&mut registered).is_err());
        assert!(registered.is_empty());
        assert!(b.into_groups().is_err());
    }

    #[test]
    fn test_same_field_name_in_different_groups_is_fine() {
        let mut b = builder();
        b.add_field_group(GroupDecl::new("Hero"))
            .unwrap()
            .add_field(FieldDecl::new("text", "Title"))
            .unwrap()
            .add_field_group(GroupDecl::new("Footer"))
            .unwrap()
            .add_field(FieldDecl::new("text", "Title"))
            .unwrap();

        let groups = b.finish().unwrap();
        assert_ne!(groups[0].fields[0].key, groups[1].fields[0].key);
    }

    #[test]
    fn test_narrow_keys_collide_across_distinct_declarations() {
        // 17 distinct fields cannot fit in 16 one-character hashes.
        let mut b = DefinitionBuilder::with_keys(
            &StaticHost::acf_pro(),
            KeyGenerator::with_width(1),
        )
        .unwrap();
        b.add_field_group(GroupDecl::new("Hero").key("hero")).unwrap();

        let result = (0..17).try_for_each(|i| {
            b.add_field(FieldDecl::new("text", format!("Field {i}")))
                .map(|_| ())
        });
        assert!(matches!(
            result,
            Err(BuildError::DuplicateIdentifier { .. })
        ));
    }

    #[test]
    fn test_register_with_hands_over_each_group() {
        let mut b = builder();
        b.add_field_group(GroupDecl::new("One"))
            .unwrap()
            .add_field_group(GroupDecl::new("Two"))
            .unwrap();

        let mut registered: Vec<Value> = Vec::new();
        assert_eq!(b.register_with(&mut registered).unwrap(), 2);
        assert_eq!(registered.len(), 2);
        assert_eq!(registered[1].get("title"), Some(&Value::string("Two")));
    }

    #[test]
    fn test_layout_protected_options() {
        let mut b = builder();
        b.add_field_group(GroupDecl::new("Page"))
            .unwrap()
            .add_field(FieldDecl::new("flexible_content", "Sections"))
            .unwrap()
            .add_layout(
                LayoutDecl::new("Intro Block", "Intro")
                    .option("display", "table")
                    .option("name", "hijacked")
                    .option("max", 1i64),
            )
            .unwrap();

        let layout = &b.finish().unwrap()[0].fields[0].layouts()[0];
        assert_eq!(layout.name, "intro_block");
        assert_eq!(layout.label, "Intro");
        assert_eq!(layout.display, Display::Block);
        assert_eq!(layout.settings.get("max"), Some(&Value::Int(1)));
    }
}
