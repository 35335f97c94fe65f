use crate::calendar::{Canvas, Rect};
use crate::font::Font;
use crate::theme::Rgb;
use miniz_oxide::deflate::compress_to_vec_zlib;
use pdf_writer::types::{CidFontType, FontFlags, SystemInfo, UnicodeCmap};
use pdf_writer::{Content, Filter, Finish, Name, Pdf, Ref, Str, TextStr};
use std::collections::BTreeMap;

/// Resource name of the one font on the page
const FONT_RESOURCE: Name<'static> = Name(b"F1");

const CMAP_NAME: Name<'static> = Name(b"Custom");

const SYSTEM_INFO: SystemInfo<'static> = SystemInfo {
    registry: Str(b"Adobe"),
    ordering: Str(b"Identity"),
    supplement: 0,
};

const COMPRESSION_LEVEL: u8 = 6;

const PRODUCER: &str = concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"));

/// A single PDF page under construction.
///
/// Text is written as two-byte glyph IDs against the embedded font; every
/// glyph drawn is remembered so that the font's width array and `ToUnicode`
/// map can be written when the document is finished.
pub(crate) struct PdfCanvas<'a> {
    font: &'a Font,
    content: Content,
    // glyph ID -> (character, advance)
    used_glyphs: BTreeMap<u16, (char, u16)>,
}

impl<'a> PdfCanvas<'a> {
    pub(crate) fn new(font: &'a Font) -> Self {
        PdfCanvas {
            font,
            content: Content::new(),
            used_glyphs: BTreeMap::new(),
        }
    }

    fn encode(&mut self, text: &str) -> Vec<u8> {
        let mut encoded = Vec::with_capacity(text.len() * 2);
        for ch in text.chars() {
            let glyph = self.font.glyph_or_notdef(ch);
            self.used_glyphs
                .entry(glyph.id)
                .or_insert((ch, glyph.advance));
            encoded.extend(glyph.id.to_be_bytes());
        }
        encoded
    }

    /// Assembles the complete document: one page of the given size holding
    /// everything drawn so far.
    ///
    /// No creation date is recorded, so the same drawing always produces the
    /// same bytes.
    pub(crate) fn finish(self, page_width: f32, page_height: f32, title: &str) -> Vec<u8> {
        let mut alloc = Ref::new(1);
        let catalog_id = alloc.bump();
        let page_tree_id = alloc.bump();
        let page_id = alloc.bump();
        let content_id = alloc.bump();
        let type0_id = alloc.bump();
        let cid_id = alloc.bump();
        let descriptor_id = alloc.bump();
        let cmap_id = alloc.bump();
        let font_file_id = alloc.bump();
        let info_id = alloc.bump();

        let mut pdf = Pdf::new();
        pdf.catalog(catalog_id).pages(page_tree_id);
        pdf.pages(page_tree_id).kids([page_id]).count(1);

        let mut page = pdf.page(page_id);
        page.media_box(pdf_writer::Rect::new(0.0, 0.0, page_width, page_height));
        page.parent(page_tree_id);
        page.contents(content_id);
        page.resources().fonts().pair(FONT_RESOURCE, type0_id);
        page.finish();

        let PdfCanvas {
            font,
            content,
            used_glyphs,
        } = self;
        let raw = content.finish();
        let compressed = compress_to_vec_zlib(&raw, COMPRESSION_LEVEL);
        pdf.stream(content_id, &compressed).filter(Filter::FlateDecode);

        write_font(
            &mut pdf,
            font,
            &used_glyphs,
            [type0_id, cid_id, descriptor_id, cmap_id, font_file_id],
        );

        pdf.document_info(info_id)
            .title(TextStr(title))
            .producer(TextStr(PRODUCER));

        pdf.finish()
    }
}

// Embeds the whole TrueType program as a CIDFontType2 font addressed by glyph
// ID (Identity-H)
fn write_font(
    pdf: &mut Pdf,
    font: &Font,
    used_glyphs: &BTreeMap<u16, (char, u16)>,
    ids: [Ref; 5],
) {
    let [type0_id, cid_id, descriptor_id, cmap_id, font_file_id] = ids;
    let base_font = Name(font.postscript_name().as_bytes());

    pdf.type0_font(type0_id)
        .base_font(base_font)
        .encoding_predefined(Name(b"Identity-H"))
        .descendant_font(cid_id)
        .to_unicode(cmap_id);

    let mut cid = pdf.cid_font(cid_id);
    cid.subtype(CidFontType::Type2);
    cid.base_font(base_font);
    cid.system_info(SYSTEM_INFO);
    cid.font_descriptor(descriptor_id);
    cid.default_width(0.0);
    cid.cid_to_gid_map_predefined(Name(b"Identity"));
    let mut widths = cid.widths();
    for (&id, &(_, advance)) in used_glyphs {
        widths.consecutive(id, [font.to_pdf_units(f32::from(advance))]);
    }
    widths.finish();
    cid.finish();

    let [x_min, y_min, x_max, y_max] = font.bbox();
    pdf.font_descriptor(descriptor_id)
        .name(base_font)
        .flags(FontFlags::NON_SYMBOLIC)
        .bbox(pdf_writer::Rect::new(x_min, y_min, x_max, y_max))
        .italic_angle(0.0)
        .ascent(font.ascender())
        .descent(font.descender())
        .cap_height(font.cap_height())
        .stem_v(80.0)
        .font_file2(font_file_id);

    let mut cmap = UnicodeCmap::new(CMAP_NAME, SYSTEM_INFO);
    for (&id, &(ch, _)) in used_glyphs {
        cmap.pair(id, ch);
    }
    pdf.cmap(cmap_id, &cmap.finish());

    let data = font.data();
    let compressed = compress_to_vec_zlib(data, COMPRESSION_LEVEL);
    pdf.stream(font_file_id, &compressed)
        .filter(Filter::FlateDecode)
        .pair(Name(b"Length1"), i32::try_from(data.len()).unwrap_or(i32::MAX));
}

impl Canvas for PdfCanvas<'_> {
    fn stroke_rect(&mut self, rect: Rect, color: Rgb, line_width: f32) {
        let (r, g, b) = color.to_unit();
        self.content
            .set_stroke_rgb(r, g, b)
            .set_line_width(line_width)
            .rect(rect.x, rect.y, rect.width, rect.height)
            .stroke();
    }

    fn text_width(&self, text: &str, size: f32) -> f32 {
        self.font.text_width(text, size)
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str, size: f32, color: Rgb) {
        let encoded = self.encode(text);
        let (r, g, b) = color.to_unit();
        self.content
            .set_fill_rgb(r, g, b)
            .begin_text()
            .set_font(FONT_RESOURCE, size)
            .next_line(x, y)
            .show(Str(&encoded))
            .end_text();
    }
}
