// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Content-line assembly: `NAME;KEY=VALUE;…:value`, unfolded.

use crate::formatter::value::{implied_parameters, render_value};
use crate::model::property::PropertyValue;
use crate::syntax::scanner::Parameter;

/// Assemble the logical content line for one property.
pub(crate) fn content_line(name: &str, value: &PropertyValue) -> String {
    let mut line = String::from(name);
    for parameter in implied_parameters(value) {
        render_parameter(&mut line, &parameter);
    }
    line.push(':');
    line.push_str(&render_value(value));
    line
}

/// Render one `;KEY=VALUE` segment. Multiple values are comma-joined and
/// double-quoted only when there is more than one of them.
fn render_parameter(out: &mut String, parameter: &Parameter) {
    out.push(';');
    out.push_str(&parameter.key);
    out.push('=');
    if parameter.values.len() > 1 {
        out.push('"');
        out.push_str(&parameter.values.join(","));
        out.push('"');
    } else {
        out.push_str(parameter.values.first().map_or("", String::as_str));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::property::Attachment;

    #[test]
    fn assembles_plain_line() {
        let line = content_line("SUMMARY", &PropertyValue::Text("Team Meeting".into()));
        assert_eq!(line, "SUMMARY:Team Meeting");
    }

    #[test]
    fn renders_attachment_parameters() {
        let mut attachment = Attachment::new("http://example.com/a.pdf");
        attachment.parameters.push(Parameter::new("FMTTYPE", "application/pdf"));
        let line = content_line("ATTACH", &PropertyValue::Attachment(attachment));
        assert_eq!(line, "ATTACH;FMTTYPE=application/pdf:http://example.com/a.pdf");
    }

    #[test]
    fn quotes_multi_value_parameters_only() {
        let mut attachment = Attachment::new("v");
        attachment.parameters.push(Parameter {
            key: "X-MULTI".into(),
            values: vec!["a".into(), "b".into()],
        });
        attachment.parameters.push(Parameter::new("X-SINGLE", "c"));
        let line = content_line("ATTACH", &PropertyValue::Attachment(attachment));
        assert_eq!(line, "ATTACH;X-MULTI=\"a,b\";X-SINGLE=c:v");
    }
}
