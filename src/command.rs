#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Command {
  ClearStats,
  ClosePopup,
  ConfirmClear,
  FocusFeed,
  FocusItems,
  FocusNext,
  None,
  OpenImage,
  PageDown,
  PageUp,
  Quit,
  Reload,
  SelectFirst,
  SelectItem,
  SelectLast,
  SelectNext,
  SelectPrevious,
  ShowHelp,
  ToggleVote,
}
