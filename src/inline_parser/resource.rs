//! Parsing for link and image resource syntax: `[alt]`, `[alt](src)`,
//! `[alt](src "title")`.

use super::Frag;

/// The parsed fields of a resource, plus how many stack slots the match
/// consumed. Callers splice exactly `offset` slots out of the working
/// stack and substitute the rendered element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub alt: Option<String>,
    pub src: Option<String>,
    pub title: Option<String>,
    pub offset: usize,
}

/// Try to parse a resource from the start of a fragment slice.
///
/// Returns `None` when an opening `[` has no matching `]` before the
/// slice ends. A `Some` result may still be invalid for the caller's
/// purposes (neither src nor alt); such resources are left untouched on
/// the stack. The offset always includes the closing bracket and paren.
pub(crate) fn parse_resource(slice: &[Frag]) -> Option<Resource> {
    if slice.len() < 3 {
        return None;
    }

    let mut resource = Resource {
        alt: None,
        src: None,
        title: None,
        offset: 0,
    };

    if slice[0].is_run('[', 1) {
        let mut alt = String::new();
        resource.offset = 1;
        loop {
            match slice.get(resource.offset) {
                Some(frag) if frag.is_run(']', 1) => {
                    resource.alt = Some(alt);
                    break;
                }
                Some(frag) => {
                    alt.push_str(&frag.rendered());
                    resource.offset += 1;
                }
                None => return None,
            }
        }
        resource.offset += 1;
    }

    let Some(frag) = slice.get(resource.offset) else {
        return Some(resource);
    };
    if !frag.is_run('(', 1) {
        return Some(resource);
    }
    resource.offset += 1;

    // 0 = accumulating src, 1 = accumulating title, 2 = done
    let mut step = 0;
    let mut current = String::new();
    while let Some(frag) = slice.get(resource.offset) {
        resource.offset += 1;
        if frag.is_run(')', 1) {
            if step == 0 {
                resource.src = Some(current.trim().to_string());
            }
            break;
        }
        match frag {
            Frag::Run { ch: '"', len } => {
                if step == 0 {
                    resource.src = Some(current.trim().to_string());
                    current = String::new();
                    step = 1;
                    // An immediately repeated quote closes an empty title.
                    if *len > 1 {
                        resource.title = Some(String::new());
                        step = 2;
                    }
                } else if step == 1 {
                    resource.title = Some(std::mem::take(&mut current));
                    step = 2;
                }
            }
            _ if step < 2 => current.push_str(&frag.rendered()),
            _ => {}
        }
    }

    Some(resource)
}
