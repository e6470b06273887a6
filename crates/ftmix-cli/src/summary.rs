use console::Style;
use ftmix_core::mix::Weight;
use ftmix_core::pipeline::config::MixConfig;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_mix_summary(config: &MixConfig, primitive_name: &str) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Fourier Mix"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(11)));
    println!();

    println!("  {}", s.header.apply_to("Inputs"));
    for (i, path) in config.inputs.iter().enumerate() {
        let weight = config.weights.get(i).copied().unwrap_or_default();
        println!(
            "    {:<4}{:<40}{}",
            s.label.apply_to(i + 1),
            s.path.apply_to(path.display()),
            s.value.apply_to(weight)
        );
    }
    if config.weights.is_empty() {
        println!(
            "    {}",
            s.disabled
                .apply_to(format!("default gains {}", Weight::default()))
        );
    }
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Basis"),
        s.method.apply_to(config.basis)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Mode"),
        s.method.apply_to(config.mode)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Transform"),
        s.method.apply_to(primitive_name)
    );
    println!(
        "  {:<14}{} {}",
        s.label.apply_to("Output"),
        s.value.apply_to(config.output_slot),
        s.path.apply_to(config.output.display())
    );
    match config.spectrum_dir {
        Some(ref dir) => println!(
            "  {:<14}{}",
            s.label.apply_to("Spectrum"),
            s.path.apply_to(dir.display())
        ),
        None => println!(
            "  {:<14}{}",
            s.label.apply_to("Spectrum"),
            s.disabled.apply_to("not saved")
        ),
    }
    println!();
}
