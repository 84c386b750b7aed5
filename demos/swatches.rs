use std::{env,
          io::{BufWriter, Write},
          fs::File,
          error::Error};
use palette_elevation::{palettes, Color, ColorScheme, LayerContext,
                        PaletteContext, Prominence};

type Err = Box<dyn Error>;

fn swatch(fh: &mut impl Write, bg: &Color, fg: Option<&Color>,
          label: &str) -> Result<(), Err> {
    let fg = fg.map_or("inherit", Color::as_str);
    writeln!(fh, "  <td style=\"width: 90px; height: 40px; padding: 4px; \
                  background-color: {bg}; color: {fg}\">{label}</td>")?;
    Ok(())
}

fn chain(fh: &mut impl Write, ctx: &PaletteContext,
         comment: &str) -> Result<(), Err> {
    writeln!(fh, "<table style=\"border: 0px; border-spacing: 0px\"><tr>")?;
    let mut ctx = ctx.clone();
    loop {
        let e = ctx.entry();
        let fg = e.attrs().get("fg");
        swatch(fh, e.bg_primary(), fg, &format!("{} primary", e.elevation()))?;
        swatch(fh, e.bg_secondary(), fg, "secondary")?;
        let up = ctx.elevated();
        if up == ctx { break }
        ctx = up;
    }
    writeln!(fh, "<td style=\"padding-left: 7px\">{comment}</td></tr>\
                  </table><br/>")?;
    Ok(())
}

fn layers(fh: &mut impl Write, ctx: &LayerContext,
          comment: &str) -> Result<(), Err> {
    let resolved = ctx.resolved();
    writeln!(fh, "<table style=\"border: 0px; border-spacing: 0px\"><tr>")?;
    for p in Prominence::ALL {
        if let Some(bg) = resolved.color("bg", p) {
            swatch(fh, bg, resolved.color("fg", p), &format!("{p:?}"))?;
        }
    }
    writeln!(fh, "<td style=\"padding-left: 7px\">{comment} \
                  (elevation {})</td></tr></table><br/>",
             resolved.elevation())?;
    Ok(())
}


fn main() -> Result<(), Err> {
    let mut fh = BufWriter::new(File::create("swatches.html")?);
    writeln!(fh, "<html>\n\
                  <head>\n\
                  <title>palette-elevation: {}</title>\n\
                  </head>\n\
                  <body>",
             env::args().next().unwrap_or_default())?;

    writeln!(fh, "<h3>Elevation chains</h3>")?;
    let root = PaletteContext::root(palettes::neutral(), ColorScheme::Light);
    chain(&mut fh, &root, "light")?;
    chain(&mut fh, &root.invert(), "dark (inverted)")?;

    writeln!(fh, "<h3>Layer resolution</h3>")?;
    let ctx = LayerContext::new(palettes::neutral_layers(ColorScheme::Light),
                                palettes::neutral_layers(ColorScheme::Dark),
                                ColorScheme::Light);
    for ctx in [ctx.clone(), ctx.invert()] {
        for e in 0 ..= 3 {
            layers(&mut fh, &ctx.elevate(e), &ctx.scheme().to_string())?;
        }
    }

    writeln!(fh, "</body>\n\
                  </html>")?;
    Ok(())
}
