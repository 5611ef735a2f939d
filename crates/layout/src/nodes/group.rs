use super::paragraph::{Paragraph, TextStyle};
use super::rule::HorizontalRule;
use super::spacer::Spacer;
use folio_traits::{Canvas, Flowable, FlowableRef, OnPlaced, PlacementContext};
use std::rc::Rc;

/// Several flowables laid out as one block.
///
/// When the whole group does not fit, it splits between its children. Nested
/// placement hooks fire when the part of the group holding them is placed.
#[derive(Debug, Clone)]
pub struct Group {
    children: Vec<FlowableRef>,
    space_before: f32,
    space_after: f32,
}

impl Group {
    pub fn new(children: Vec<FlowableRef>) -> Self {
        Self {
            children,
            space_before: 0.0,
            space_after: 0.0,
        }
    }

    pub fn with_spacing(mut self, before: f32, after: f32) -> Self {
        self.space_before = before;
        self.space_after = after;
        self
    }

    fn part(children: Vec<FlowableRef>, space_before: f32, space_after: f32) -> FlowableRef {
        Rc::new(Self {
            children,
            space_before,
            space_after,
        })
    }
}

impl Flowable for Group {
    fn wrap(&self, avail_width: f32) -> f32 {
        let content: f32 = self.children.iter().map(|c| c.wrap(avail_width)).sum();
        self.space_before + content + self.space_after
    }

    fn split(&self, avail_width: f32, avail_height: f32) -> Option<(FlowableRef, FlowableRef)> {
        let mut remaining = avail_height - self.space_before;
        let mut fitting = 0;
        for child in &self.children {
            let h = child.wrap(avail_width);
            if h > remaining + 0.001 {
                break;
            }
            remaining -= h;
            fitting += 1;
        }

        if fitting == self.children.len() {
            return None;
        }

        if fitting > 0 {
            let head = Self::part(self.children[..fitting].to_vec(), self.space_before, 0.0);
            let tail = Self::part(self.children[fitting..].to_vec(), 0.0, self.space_after);
            return Some((head, tail));
        }

        // Nothing fits whole: try to split the first child in place.
        let (first_head, first_tail) = self.children[0].split(avail_width, remaining)?;
        let mut tail_children = vec![first_tail];
        tail_children.extend(self.children[1..].iter().cloned());
        Some((
            Self::part(vec![first_head], self.space_before, 0.0),
            Self::part(tail_children, 0.0, self.space_after),
        ))
    }

    fn draw(&self, canvas: &mut dyn Canvas, x: f32, y: f32, width: f32) {
        let mut child_y = y + self.space_before;
        for child in &self.children {
            child.draw(canvas, x, child_y, width);
            child_y += child.wrap(width);
        }
    }

    fn children(&self) -> &[FlowableRef] {
        &self.children
    }

    fn as_placement_hook(&self) -> Option<&dyn OnPlaced> {
        Some(self)
    }
}

impl OnPlaced for Group {
    fn on_placed(&self, doc: &mut PlacementContext<'_, '_>) {
        for child in &self.children {
            if let Some(hook) = child.as_placement_hook() {
                hook.on_placed(doc);
            }
        }
    }
}

/// A signature block: a rule to sign on, the signer's name, an optional
/// qualification and a "location, date" line.
pub fn signature(
    name: &str,
    location: &str,
    date: &str,
    qualification: Option<&str>,
    style: TextStyle,
) -> Group {
    let mut children: Vec<FlowableRef> = vec![
        Rc::new(HorizontalRule::new(0.4, 0.5).with_spacing(96.0, 8.0)),
        Rc::new(Paragraph::new(name).with_style(style.clone())),
    ];
    if let Some(qualification) = qualification {
        children.push(Rc::new(Paragraph::new(qualification).with_style(style.clone())));
    }
    children.push(Rc::new(Spacer::new(24.0)));
    children.push(Rc::new(Paragraph::new(format!("{location}, {date}")).with_style(style)));
    Group::new(children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{DrawOp, Page};

    fn body() -> TextStyle {
        TextStyle::default().with_spacing(0.0, 0.0)
    }

    #[test]
    fn height_includes_children_and_spacing() {
        let group = Group::new(vec![Rc::new(Spacer::new(10.0)), Rc::new(Spacer::new(5.0))])
            .with_spacing(1.0, 2.0);
        assert_eq!(group.wrap(100.0), 18.0);
    }

    #[test]
    fn splits_between_children() {
        let group = Group::new(vec![
            Rc::new(Spacer::new(10.0)),
            Rc::new(Spacer::new(10.0)),
            Rc::new(Spacer::new(10.0)),
        ]);
        let (head, tail) = group.split(100.0, 25.0).unwrap();
        assert_eq!(head.children().len(), 2);
        assert_eq!(tail.children().len(), 1);
    }

    #[test]
    fn splits_inside_first_child_when_needed() {
        let text = Paragraph::new("one two three four five six").with_style(body());
        let group = Group::new(vec![Rc::new(text), Rc::new(Spacer::new(10.0))]);
        // 50pt wide => "one two" / "three four" / "five six"; one 12pt line fits.
        let (head, tail) = group.split(50.0, 13.0).unwrap();
        assert!((head.wrap(50.0) - 12.0).abs() < 0.001);
        assert_eq!(tail.children().len(), 2);
    }

    #[test]
    fn signature_draws_rule_and_lines() {
        let sig = signature("Jane Roe", "Berlin", "2024-01-01", Some("Engineer"), body());
        let mut page = Page::new(1);
        sig.draw(&mut page, 0.0, 0.0, 400.0);
        assert!(matches!(page.ops[0], DrawOp::Rule { width, .. } if (width - 160.0).abs() < 0.001));
        let text = page.text();
        assert!(text.contains("Jane Roe"));
        assert!(text.contains("Engineer"));
        assert!(text.contains("Berlin, 2024-01-01"));
    }
}
