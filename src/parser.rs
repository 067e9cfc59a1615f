//! XML parsing of the SonicWall authentication reply

const AUTHENTICATION_REPLY: &str = "AuthenticationReply";
const RESPONSE_CODE: &str = "ResponseCode";

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("reply is not well-formed XML: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("reply has no {0} element")]
    MissingNode(&'static str),
    #[error("ResponseCode element is empty")]
    EmptyCode,
}

/// Extract the text of `AuthenticationReply/ResponseCode` from the reply.
///
/// The path is relative to the document element, and the first
/// `ResponseCode` under any `AuthenticationReply` child wins. Surrounding
/// whitespace is trimmed.
pub fn parse_response_code(xml: &str) -> Result<String, ParseError> {
    // Some firmware prefixes the reply with a DOCTYPE
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };
    let doc = roxmltree::Document::parse_with_options(xml, options)?;

    let mut replies = doc
        .root_element()
        .children()
        .filter(|child| child.has_tag_name(AUTHENTICATION_REPLY))
        .peekable();
    if replies.peek().is_none() {
        return Err(ParseError::MissingNode(AUTHENTICATION_REPLY));
    }

    let node = replies
        .flat_map(|reply| reply.children())
        .find(|child| child.has_tag_name(RESPONSE_CODE))
        .ok_or(ParseError::MissingNode(RESPONSE_CODE))?;

    match node.text().map(str::trim) {
        Some(code) if !code.is_empty() => Ok(code.to_string()),
        _ => Err(ParseError::EmptyCode),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_success_reply() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
            <SonicWallAPI>
                <AuthenticationReply>
                    <ResponseCode>50</ResponseCode>
                </AuthenticationReply>
            </SonicWallAPI>
        "#;

        assert_eq!(parse_response_code(xml).unwrap(), "50");
    }

    #[test]
    fn test_parse_error_reply() {
        let xml = "<Reply><AuthenticationReply><ResponseCode>253</ResponseCode>\
                   <Message>no such session</Message></AuthenticationReply></Reply>";

        assert_eq!(parse_response_code(xml).unwrap(), "253");
    }

    #[test]
    fn test_reply_with_doctype() {
        let xml = "<?xml version=\"1.0\"?><!DOCTYPE SonicWallAPI><SonicWallAPI>\
                   <AuthenticationReply><ResponseCode>50</ResponseCode></AuthenticationReply>\
                   </SonicWallAPI>";

        assert_eq!(parse_response_code(xml).unwrap(), "50");
    }

    #[test]
    fn test_code_found_in_later_reply_element() {
        let xml = "<Reply><AuthenticationReply><Status>pending</Status></AuthenticationReply>\
                   <AuthenticationReply><ResponseCode>51</ResponseCode></AuthenticationReply></Reply>";

        assert_eq!(parse_response_code(xml).unwrap(), "51");
    }

    #[test]
    fn test_code_whitespace_is_trimmed() {
        let xml = "<Reply><AuthenticationReply><ResponseCode>\n  2 \n</ResponseCode>\
                   </AuthenticationReply></Reply>";

        assert_eq!(parse_response_code(xml).unwrap(), "2");
    }

    #[test]
    fn test_path_is_relative_to_document_element() {
        // The document element itself is not part of the path
        let xml = "<AuthenticationReply><ResponseCode>50</ResponseCode></AuthenticationReply>";

        assert!(matches!(
            parse_response_code(xml),
            Err(ParseError::MissingNode("AuthenticationReply"))
        ));
    }

    #[test]
    fn test_missing_response_code() {
        let xml = "<Reply><AuthenticationReply><Status>ok</Status></AuthenticationReply></Reply>";

        assert!(matches!(
            parse_response_code(xml),
            Err(ParseError::MissingNode("ResponseCode"))
        ));
    }

    #[test]
    fn test_empty_response_code() {
        let xml = "<Reply><AuthenticationReply><ResponseCode/></AuthenticationReply></Reply>";

        assert!(matches!(
            parse_response_code(xml),
            Err(ParseError::EmptyCode)
        ));
    }

    #[test]
    fn test_malformed_xml() {
        assert!(matches!(
            parse_response_code("<html><body>502 Bad Gateway"),
            Err(ParseError::Xml(_))
        ));
        assert!(matches!(parse_response_code(""), Err(ParseError::Xml(_))));
    }
}
