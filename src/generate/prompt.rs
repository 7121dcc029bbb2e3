use std::fmt;

use clap::ValueEnum;
use url::Url;

pub const SYSTEM_PROMPT: &str =
    "You are a senior frontend designer. I need you to write the frontend code.";

/// Catppuccin Mocha, pasted into the palette prompt as the CSS template.
pub const CATPPUCCIN_MOCHA: &str = "\
Labels \tHex \tRGB \tHSL
\tRosewater \t#f5e0dc \trgb(245, 224, 220) \thsl(10, 56%, 91%)
\tFlamingo \t#f2cdcd \trgb(242, 205, 205) \thsl(0, 59%, 88%)
\tPink \t#f5c2e7 \trgb(245, 194, 231) \thsl(316, 72%, 86%)
\tMauve \t#cba6f7 \trgb(203, 166, 247) \thsl(267, 84%, 81%)
\tRed \t#f38ba8 \trgb(243, 139, 168) \thsl(343, 81%, 75%)
\tMaroon \t#eba0ac \trgb(235, 160, 172) \thsl(350, 65%, 77%)
\tPeach \t#fab387 \trgb(250, 179, 135) \thsl(23, 92%, 75%)
\tYellow \t#f9e2af \trgb(249, 226, 175) \thsl(41, 86%, 83%)
\tGreen \t#a6e3a1 \trgb(166, 227, 161) \thsl(115, 54%, 76%)
\tTeal \t#94e2d5 \trgb(148, 226, 213) \thsl(170, 57%, 73%)
\tSky \t#89dceb \trgb(137, 220, 235) \thsl(189, 71%, 73%)
\tSapphire \t#74c7ec \trgb(116, 199, 236) \thsl(199, 76%, 69%)
\tBlue \t#89b4fa \trgb(137, 180, 250) \thsl(217, 92%, 76%)
\tLavender \t#b4befe \trgb(180, 190, 254) \thsl(232, 97%, 85%)
\tText \t#cdd6f4 \trgb(205, 214, 244) \thsl(226, 64%, 88%)
\tSubtext1 \t#bac2de \trgb(186, 194, 222) \thsl(227, 35%, 80%)
\tSubtext0 \t#a6adc8 \trgb(166, 173, 200) \thsl(228, 24%, 72%)
\tOverlay2 \t#9399b2 \trgb(147, 153, 178) \thsl(228, 17%, 64%)
\tOverlay1 \t#7f849c \trgb(127, 132, 156) \thsl(230, 13%, 55%)
\tOverlay0 \t#6c7086 \trgb(108, 112, 134) \thsl(231, 11%, 47%)
\tSurface2 \t#585b70 \trgb(88, 91, 112) \thsl(233, 12%, 39%)
\tSurface1 \t#45475a \trgb(69, 71, 90) \thsl(234, 13%, 31%)
\tSurface0 \t#313244 \trgb(49, 50, 68) \thsl(237, 16%, 23%)
\tBase \t#1e1e2e \trgb(30, 30, 46) \thsl(240, 21%, 15%)
\tMantle \t#181825 \trgb(24, 24, 37) \thsl(240, 21%, 12%)
\tCrust \t#11111b \trgb(17, 17, 27) \thsl(240, 23%, 9%)
";

/// Which instruction template to send, selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TemplateKind {
    /// Colourful single page with gradients.
    Classic,
    /// Catppuccin palette, SEO meta tags and a call-to-action button.
    Palette,
}

impl TemplateKind {
    pub fn default_model(self) -> &'static str {
        match self {
            TemplateKind::Classic => "gpt-3.5-turbo",
            TemplateKind::Palette => "gpt-4",
        }
    }

    pub fn with_source(self, source: &Url) -> Prompt {
        match self {
            TemplateKind::Classic => Prompt::Classic,
            TemplateKind::Palette => Prompt::Palette {
                call_to_action: source.clone(),
            },
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TemplateKind::Classic => "classic",
            TemplateKind::Palette => "palette",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    Classic,
    Palette { call_to_action: Url },
}

impl Prompt {
    /// User message with `content` interpolated verbatim, even when empty.
    pub fn render(&self, content: &str) -> String {
        match self {
            Prompt::Classic => format!(
                "Generate an HTML that is colorful and well designed. \
                 Use gradient where it is reasonable. \
                 Make the website mobile friendly and SEO optimized. \
                 Include the following text: {content}"
            ),
            Prompt::Palette { call_to_action } => format!(
                "Generate an HTML that is colorful and well designed. \
                 Use gradient where it is reasonable. \
                 Make the website mobile friendly and SEO optimized meta tags. \
                 Use this CSS template: {CATPPUCCIN_MOCHA}. \
                 Add a call to action button with the URL {call_to_action}. \
                 Include the following text: {content}"
            ),
        }
    }
}
