//! Line and path templates such as `{timestamp} {tag} {scope}  {msg}` or
//! `{site}/{year}-{month}`. Parsed once, rendered for every record.

/// Known substitution tokens. Unknown `{names}` render literally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Tag,
    Scope,
    Msg,
    Timestamp,
    Level,
    Site,
    Year,
    Month,
    Day,
}

impl Placeholder {
    pub const ALL: &'static [Self] = &[
        Self::Tag,
        Self::Scope,
        Self::Msg,
        Self::Timestamp,
        Self::Level,
        Self::Site,
        Self::Year,
        Self::Month,
        Self::Day,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tag => "tag",
            Self::Scope => "scope",
            Self::Msg => "msg",
            Self::Timestamp => "timestamp",
            Self::Level => "level",
            Self::Site => "site",
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
        }
    }

    fn lookup(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|ph| ph.as_str() == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Placeholder(Placeholder),
}

#[derive(Debug, Clone)]
pub struct FormatTemplate {
    segments: Vec<Segment>,
}

impl FormatTemplate {
    #[must_use]
    pub fn parse(template: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            let Some(close) = rest[open..].find('}').map(|c| open + c) else {
                break;
            };
            literal.push_str(&rest[..open]);
            let name = &rest[open + 1..close];

            match Placeholder::lookup(name) {
                Some(ph) => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Placeholder(ph));
                }
                None => literal.push_str(&rest[open..=close]),
            }
            rest = &rest[close + 1..];
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self { segments }
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    pub fn render(&self, values: &FormatValues) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(s) => out.push_str(s),
                Segment::Placeholder(ph) => out.push_str(values.get(*ph)),
            }
        }
        out
    }
}

impl Default for FormatTemplate {
    fn default() -> Self {
        Self::parse("{tag} {scope}  {msg}")
    }
}

/// One field per placeholder so a typo is a compile error, not a blank column.
#[derive(Debug, Clone, Default)]
pub struct FormatValues {
    pub tag: String,
    pub scope: String,
    pub msg: String,
    pub timestamp: String,
    pub level: String,
    pub site: String,
    pub year: String,
    pub month: String,
    pub day: String,
}

impl FormatValues {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    #[must_use]
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    #[must_use]
    pub fn msg(mut self, msg: impl Into<String>) -> Self {
        self.msg = msg.into();
        self
    }

    #[must_use]
    pub fn timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    #[must_use]
    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    #[must_use]
    pub fn site(mut self, site: impl Into<String>) -> Self {
        self.site = site.into();
        self
    }

    /// Fills `{year}`, `{month}` and `{day}` from a local timestamp.
    #[must_use]
    pub fn date(mut self, now: &chrono::DateTime<chrono::Local>) -> Self {
        self.year = now.format("%Y").to_string();
        self.month = now.format("%m").to_string();
        self.day = now.format("%d").to_string();
        self
    }

    fn get(&self, ph: Placeholder) -> &str {
        match ph {
            Placeholder::Tag => &self.tag,
            Placeholder::Scope => &self.scope,
            Placeholder::Msg => &self.msg,
            Placeholder::Timestamp => &self.timestamp,
            Placeholder::Level => &self.level,
            Placeholder::Site => &self.site,
            Placeholder::Year => &self.year,
            Placeholder::Month => &self.month,
            Placeholder::Day => &self.day,
        }
    }
}
