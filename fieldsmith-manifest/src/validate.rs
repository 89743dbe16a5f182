//! Checks that the typed parse cannot express.

use fieldsmith_codegen::php::is_identifier;
use toml::Spanned;

use crate::{Migrations, Result, error::SourceContext};

pub(crate) fn validate(script: &Migrations, ctx: &SourceContext) -> Result<()> {
    if let Some(function) = &script.export.function {
        if !is_identifier(function.get_ref()) {
            return Err(ctx.invalid(
                format!("'{}' is not a valid PHP function name", function.get_ref()),
                Some(function.span().into()),
            ));
        }
    }
    if let Some(hook) = &script.export.hook {
        if hook.trim().is_empty() {
            return Err(ctx.invalid("export hook must not be empty", None));
        }
    }

    for group in &script.groups {
        non_empty(ctx, &group.name, "group name")?;
        for field in &group.fields {
            non_empty(ctx, &field.name, "field name")?;
            non_empty(ctx, &field.field_type, "field type")?;
            for sub_field in &field.sub_fields {
                non_empty(ctx, &sub_field.name, "sub-field name")?;
                non_empty(ctx, &sub_field.field_type, "sub-field type")?;
            }
            for layout in &field.layouts {
                non_empty(ctx, &layout.name, "layout name")?;
                for sub_field in &layout.sub_fields {
                    non_empty(ctx, &sub_field.name, "sub-field name")?;
                    non_empty(ctx, &sub_field.field_type, "sub-field type")?;
                }
            }
        }
    }
    Ok(())
}

fn non_empty(ctx: &SourceContext, value: &Spanned<String>, what: &str) -> Result<()> {
    if value.get_ref().trim().is_empty() {
        return Err(ctx.invalid(
            format!("{what} must not be empty"),
            Some(value.span().into()),
        ));
    }
    Ok(())
}
