#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ForceRefresh,
    OpenMacmonTerminal,
    ToggleStartup,
    SetRefreshInterval(u64),
    SetNonSystemLimit(u8),
    MenuUp,
    MenuDown,
    Activate,
    None,
}
