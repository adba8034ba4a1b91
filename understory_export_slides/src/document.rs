// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arena-owned slide document.

use kurbo::{Rect, Size};
use peniko::Color;

use crate::shape::{FontRef, PersistedShape, ShapeKind, TextAlign, TextBox, VerticalAlignment};

/// Identifier for a slide.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SlideId(pub u32);

/// Identifier for a shape.
///
/// Stable for the lifetime of the document; shapes are never removed.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ShapeId(pub u32);

/// Identifier for an embedded picture.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PictureId(pub u32);

/// Where a new shape is placed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Container {
    /// Top level of a slide.
    Slide(SlideId),
    /// Inside a group shape.
    Group(ShapeId),
}

/// One slide: its size, optional title and top-level shapes in z-order.
#[derive(Clone, Debug, PartialEq)]
pub struct Slide {
    /// Page size in slide units.
    pub size: Size,
    /// Title text box, if one was set.
    pub title: Option<ShapeId>,
    /// Top-level shapes, back to front.
    pub children: Vec<ShapeId>,
}

/// Encoding of embedded picture bytes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PictureFormat {
    /// Portable Network Graphics.
    Png,
}

/// An embedded raster picture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Picture {
    /// Encoding of `data`.
    pub format: PictureFormat,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Encoded bytes.
    pub data: Vec<u8>,
}

/// Ordered list of font families referenced by index from text boxes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontTable {
    names: Vec<String>,
}

impl Default for FontTable {
    fn default() -> Self {
        Self {
            names: vec![String::from("Arial")],
        }
    }
}

impl FontTable {
    /// Index of `name`, if registered. Matching is exact.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<u16> {
        let index = self.names.iter().position(|n| n == name)?;
        u16::try_from(index).ok()
    }

    /// Register `name`, returning its index. Registering twice is a no-op.
    pub fn register(&mut self, name: &str) -> u16 {
        if let Some(index) = self.lookup(name) {
            return index;
        }
        let index = u16::try_from(self.names.len()).expect("too many fonts for u16 font index");
        self.names.push(String::from(name));
        index
    }

    /// Registered names in index order.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// Height of the title band as a fraction of the slide height.
const TITLE_BAND: f64 = 0.15;
/// Title font size as a fraction of the slide height.
const TITLE_FONT: f64 = 0.06;

/// A document of slides, shapes and pictures.
///
/// All objects live in flat arenas and refer to each other by id. Groups
/// own their children's ids; children never point back at their parent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SlideShow {
    slides: Vec<Slide>,
    shapes: Vec<PersistedShape>,
    pictures: Vec<Picture>,
    fonts: FontTable,
}

impl SlideShow {
    /// An empty document with the default font table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an empty slide of `size`.
    pub fn create_slide(&mut self, size: Size) -> SlideId {
        let id = u32::try_from(self.slides.len()).expect("too many slides for u32 SlideId");
        self.slides.push(Slide {
            size,
            title: None,
            children: Vec::new(),
        });
        SlideId(id)
    }

    /// The slide with `id`.
    pub fn slide(&self, id: SlideId) -> Option<&Slide> {
        self.slides.get(id.0 as usize)
    }

    /// All slides in creation order.
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Append `shape` as the front-most child of `container`.
    ///
    /// Returns `None` if the container does not exist or is not a group.
    pub fn add_shape(&mut self, container: Container, shape: PersistedShape) -> Option<ShapeId> {
        let id =
            ShapeId(u32::try_from(self.shapes.len()).expect("too many shapes for u32 ShapeId"));
        let children = match container {
            Container::Slide(slide) => &mut self.slides.get_mut(slide.0 as usize)?.children,
            Container::Group(group) => match &mut self.shapes.get_mut(group.0 as usize)?.kind {
                ShapeKind::Group { children, .. } => children,
                _ => return None,
            },
        };
        children.push(id);
        self.shapes.push(shape);
        Some(id)
    }

    /// The shape with `id`.
    pub fn shape(&self, id: ShapeId) -> Option<&PersistedShape> {
        self.shapes.get(id.0 as usize)
    }

    /// Number of shapes in the document, across all slides.
    #[must_use]
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Direct children of `container`, back to front.
    pub fn children(&self, container: Container) -> &[ShapeId] {
        match container {
            Container::Slide(slide) => self
                .slide(slide)
                .map_or(&[] as &[ShapeId], |s| s.children.as_slice()),
            Container::Group(group) => self
                .shape(group)
                .map_or(&[] as &[ShapeId], PersistedShape::children),
        }
    }

    /// Every shape on `slide`, depth first, parents before their children.
    pub fn descendants(&self, slide: SlideId) -> Vec<ShapeId> {
        let mut out = Vec::new();
        let mut stack: Vec<ShapeId> = self
            .children(Container::Slide(slide))
            .iter()
            .rev()
            .copied()
            .collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(Container::Group(id)).iter().rev().copied());
        }
        out
    }

    /// Embed a picture.
    pub fn add_picture(&mut self, picture: Picture) -> PictureId {
        let id = u32::try_from(self.pictures.len()).expect("too many pictures for u32 PictureId");
        self.pictures.push(picture);
        PictureId(id)
    }

    /// The picture with `id`.
    pub fn picture(&self, id: PictureId) -> Option<&Picture> {
        self.pictures.get(id.0 as usize)
    }

    /// The document font table.
    pub fn font_table(&self) -> &FontTable {
        &self.fonts
    }

    /// The document font table, mutably.
    pub fn font_table_mut(&mut self) -> &mut FontTable {
        &mut self.fonts
    }

    /// Set the title of `slide`.
    ///
    /// The title is a centered text box across the top band of the slide,
    /// added as a top-level shape the first time; later calls replace its
    /// text.
    pub fn set_title(&mut self, slide: SlideId, text: &str) -> Option<ShapeId> {
        let existing = self.slide(slide)?.title;
        if let Some(id) = existing {
            if let Some(ShapeKind::TextBox(text_box)) =
                self.shapes.get_mut(id.0 as usize).map(|s| &mut s.kind)
            {
                text_box.text = String::from(text);
            }
            return Some(id);
        }
        let size = self.slide(slide)?.size;
        let anchor = Rect::new(
            size.width * 0.05,
            size.height * 0.02,
            size.width * 0.95,
            size.height * (0.02 + TITLE_BAND),
        );
        let mut text_box = TextBox::new(
            text,
            (size.height * TITLE_FONT).round().max(1.0),
            FontRef::Index(0),
            Color::BLACK,
        );
        text_box.word_wrap = true;
        text_box.vertical_alignment = VerticalAlignment::Middle;
        text_box.align = TextAlign::Center;
        let id = self.add_shape(
            Container::Slide(slide),
            PersistedShape::new(anchor, ShapeKind::TextBox(text_box)),
        )?;
        if let Some(s) = self.slides.get_mut(slide.0 as usize) {
            s.title = Some(id);
        }
        Some(id)
    }
}
