use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinType {
    pub name: &'static str,
    pub extension: &'static str,
}

const fn builtin(name: &'static str, extension: &'static str) -> Option<BuiltinType> {
    Some(BuiltinType { name, extension })
}

pub const BUILTIN_TYPE_COUNT: usize = 25;

pub const UNKNOWN_EXTENSION: &str = "bin";

pub static BUILTIN_TYPES: [Option<BuiltinType>; BUILTIN_TYPE_COUNT] = [
    None,
    builtin("cursor", "cur"),
    builtin("bitmap", "bmp"),
    builtin("icon", "ico"),
    builtin("menu", "menu.rc"),
    builtin("dialog", "dlg"),
    builtin("string", "string.rc"),
    builtin("fontdir", "fontdir.fnt"),
    builtin("font", "font.fnt"),
    builtin("accelerator", "accelerator.rc"),
    builtin("rcdata", "rcdata.rc"),
    builtin("messagetable", "mc"),
    builtin("group_cursor", "group_cursor"),
    builtin("group_icon", "group_icon"),
    None,
    None,
    builtin("version", "version.rc"),
    builtin("dlginclude", "dlginclude.rc"),
    None,
    builtin("plugplay", "plugplay"),
    builtin("vxd", "vxd"),
    builtin("anicursor", "anicursor"),
    builtin("aniicon", "aniicon"),
    builtin("html", "htm"),
    builtin("manifest", "manifest"),
];

pub fn lookup(id: u16) -> Option<&'static BuiltinType> {
    BUILTIN_TYPES.get(usize::from(id)).and_then(Option::as_ref)
}

pub fn name_of(id: u16) -> Cow<'static, str> {
    match lookup(id) {
        Some(t) => Cow::Borrowed(t.name),
        None => Cow::Owned(format!("unknown({})", id)),
    }
}

pub fn extension_of(id: u16) -> &'static str {
    lookup(id).map_or(UNKNOWN_EXTENSION, |t| t.extension)
}
