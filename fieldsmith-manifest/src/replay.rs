//! Replaying a script into a builder session.

use fieldsmith_builder::DefinitionBuilder;
use miette::SourceSpan;
use toml::Spanned;
use tracing::debug;

use crate::{Migrations, Result, error::SourceContext};

impl Migrations {
    /// Feed every declaration to `builder`, in source order.
    ///
    /// Each field is followed by its direct sub-fields, then by each of its
    /// layouts with that layout's sub-fields. The open group is left pending;
    /// exporting or finishing the builder flushes it.
    pub fn replay(&self, builder: &mut DefinitionBuilder) -> Result<()> {
        let ctx = self.source_context();
        let fields_before = builder.field_count();

        for group in &self.groups {
            declare(&ctx, "group", &group.name, |b| b.add_field_group(group.to_decl()), builder)?;

            for field in &group.fields {
                declare(&ctx, "field", &field.name, |b| b.add_field(field.to_decl()), builder)?;
                for sub_field in &field.sub_fields {
                    declare(
                        &ctx,
                        "sub-field",
                        &sub_field.name,
                        |b| b.add_sub_field(sub_field.to_decl()),
                        builder,
                    )?;
                }
                for layout in &field.layouts {
                    declare(&ctx, "layout", &layout.name, |b| b.add_layout(layout.to_decl()), builder)?;
                    for sub_field in &layout.sub_fields {
                        declare(
                            &ctx,
                            "sub-field",
                            &sub_field.name,
                            |b| b.add_sub_field(sub_field.to_decl()),
                            builder,
                        )?;
                    }
                }
            }
        }

        debug!(
            script = ctx.name(),
            groups = self.groups.len(),
            fields = builder.field_count() - fields_before,
            "declaration script replayed"
        );
        Ok(())
    }
}

fn declare<F>(
    ctx: &SourceContext,
    kind: &str,
    name: &Spanned<String>,
    call: F,
    builder: &mut DefinitionBuilder,
) -> Result<()>
where
    F: FnOnce(&mut DefinitionBuilder) -> fieldsmith_builder::Result<&mut DefinitionBuilder>,
{
    call(builder).map(|_| ()).map_err(|source| {
        let span = (!ctx.text().is_empty()).then(|| SourceSpan::from(name.span()));
        ctx.rejected(format!("{kind} '{}'", name.get_ref()), span, source)
    })
}

#[cfg(test)]
mod tests {
    use fieldsmith_builder::{BuildError, KeyGenerator, SessionState, StaticHost};

    use crate::Error;

    use super::*;

    fn builder() -> DefinitionBuilder {
        DefinitionBuilder::new(&StaticHost::acf_pro()).unwrap()
    }

    fn replay(src: &str) -> DefinitionBuilder {
        let script: Migrations = src.parse().unwrap();
        let mut b = builder();
        script.replay(&mut b).unwrap();
        b
    }

    #[test]
    fn test_replay_leaves_last_group_open() {
        let mut b = replay(
            r#"
            [[group]]
            name = "One"

            [[group]]
            name = "Two"
            "#,
        );
        assert_eq!(b.state(), SessionState::Open);
        assert_eq!(b.groups().len(), 1);
        assert_eq!(b.finish().unwrap().len(), 2);
    }

    #[test]
    fn test_replay_order_nests_children() {
        let mut b = replay(
            r#"
            [[group]]
            name = "Page"

            [[group.field]]
            type = "flexible_content"
            name = "Sections"

            [[group.field.layout]]
            name = "intro"
            label = "Intro"

            [[group.field.layout.sub_field]]
            type = "text"
            name = "Heading"

            [[group.field.layout]]
            name = "gallery"
            label = "Gallery"

            [[group.field.layout.sub_field]]
            type = "image"
            name = "Photo"

            [[group.field]]
            type = "repeater"
            name = "Links"

            [[group.field.sub_field]]
            type = "link"
            name = "Link"
            "#,
        );

        let group = &b.finish().unwrap()[0];
        let layouts = group.fields[0].layouts();
        assert_eq!(layouts[0].sub_fields[0].name, "heading");
        assert_eq!(layouts[1].sub_fields[0].name, "photo");
        assert_eq!(group.fields[1].sub_fields()[0].name, "link");
        assert_eq!(group.field_count(), 5);
    }

    #[test]
    fn test_unsupported_children_are_dropped() {
        let mut b = replay(
            r#"
            [[group]]
            name = "Hero"

            [[group.field]]
            type = "text"
            name = "Title"

            [[group.field.sub_field]]
            type = "text"
            name = "Nested"

            [[group.field.layout]]
            name = "intro"
            "#,
        );
        let field = &b.finish().unwrap()[0].fields[0];
        assert!(field.sub_fields().is_empty());
        assert!(field.layouts().is_empty());
    }

    #[test]
    fn test_duplicate_points_at_declaration() {
        let src = r#"
            [[group]]
            name = "Hero"

            [[group.field]]
            type = "text"
            name = "Title"

            [[group.field]]
            type = "textarea"
            name = "title"
            "#;
        let script: Migrations = src.parse().unwrap();
        let err = script.replay(&mut builder()).unwrap_err();

        match *err {
            Error::Build {
                span: Some(span),
                context,
                source: BuildError::DuplicateIdentifier { .. },
                ..
            } => {
                assert_eq!(context, "field 'title'");
                let declared = &src[span.offset()..span.offset() + span.len()];
                assert_eq!(declared.trim_matches('"'), "title");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_narrow_keys_collide() {
        let mut src = String::from("[[group]]\nname = \"Hero\"\nkey = \"hero\"\n");
        for i in 0..17 {
            src.push_str(&format!("\n[[group.field]]\ntype = \"text\"\nname = \"Field {i}\"\n"));
        }
        let script: Migrations = src.parse().unwrap();
        let mut b =
            DefinitionBuilder::with_keys(&StaticHost::acf_pro(), KeyGenerator::with_width(1))
                .unwrap();

        let err = script.replay(&mut b).unwrap_err();
        assert!(matches!(
            *err,
            Error::Build {
                source: BuildError::DuplicateIdentifier { .. },
                ..
            }
        ));
        assert!(b.finish().is_err());
    }
}
