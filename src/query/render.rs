//! Object rendering: one property set to a block of text lines.

use crate::format::ValueFormatter;
use crate::query::request::RenderOptions;
use crate::value::PropertySet;

/// Renders objects according to a fixed set of options.
#[derive(Debug, Clone)]
pub struct ObjectRenderer {
    options: RenderOptions,
    formatter: ValueFormatter,
}

impl ObjectRenderer {
    pub fn new(options: RenderOptions, formatter: ValueFormatter) -> Self {
        Self { options, formatter }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Lines for one object returned by `host`.
    ///
    /// With formatting on, the block starts with a blank separator line. Each
    /// property becomes `{name}[ [{type}]] : {value}`; with `align` the name is
    /// padded to the longest name in this object.
    pub fn render(&self, host: &str, object: &PropertySet) -> Vec<String> {
        let mut lines = Vec::with_capacity(object.len() + 2);

        if self.options.apply_formatting {
            lines.push(String::new());
        }
        if self.options.show_host {
            lines.push(format!("Host: {}", host));
        }

        let width = if self.options.align {
            object.longest_name()
        } else {
            0
        };

        for property in object {
            let mut line = format!("{:<width$}", property.name, width = width);
            if self.options.show_types {
                line.push_str(" [");
                line.push_str(&property.value.type_name());
                line.push(']');
            }
            line.push_str(" : ");
            line.push_str(
                &self
                    .formatter
                    .format(&property.value, self.options.apply_formatting),
            );
            lines.push(line);
        }

        lines
    }
}
